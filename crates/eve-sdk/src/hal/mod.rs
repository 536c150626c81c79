// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/// Device backend trait.
pub mod backend;

// Re-export trait types
pub use backend::EveBackend;
