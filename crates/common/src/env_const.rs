// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

pub const ADMIN_LOG: &str = "ADMIN_LOG";

pub const ADMIN_DEFAULT_PAGE_SIZE: &str = "ADMIN_DEFAULT_PAGE_SIZE";
pub const ADMIN_MAX_PAGE_SIZE: &str = "ADMIN_MAX_PAGE_SIZE";

pub const DEFAULT_PAGE_SIZE: usize = 50;
pub const DEFAULT_MAX_PAGE_SIZE: usize = 1000;
