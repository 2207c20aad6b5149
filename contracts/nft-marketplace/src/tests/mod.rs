
// --- Unit Tests ---
pub mod unit {
    pub mod admin_test;
    pub mod events_test;
    pub mod guards_test;
    pub mod upgrade_test;
}
