//! Tests for amounts

mod prop;
