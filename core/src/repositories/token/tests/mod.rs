//! Tests for the token repository contract

mod mock_tests;
