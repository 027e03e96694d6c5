//! Tests for the user repository contract

mod mock_tests;
