// ABOUTME: Helper modules for vumpit-cli
// ABOUTME: Terminal output formatting for wizard events and directory listings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 vumpIT Sports

pub mod display;
