// Copyright (c) 2025 Nestegg Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod advisor;
pub mod exporter;
pub mod importer;
pub mod projection;
pub mod reports;
pub mod transactions;
