// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! Property struct validation across every schema table, and
//! determinism of synthesized templates.

mod required_fields;
mod synthesis;
