mod panel_guard_tests;
