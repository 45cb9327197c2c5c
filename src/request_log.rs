// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 The leave-ledger-rs authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Thread-safe request history with duplicate-id detection.
//!
//! Combines a [`DashMap`] for O(1) id lookup with an ordering list so that
//! per-employee history comes back in insertion order, which is the order
//! export layers render it in.

use crate::base::{EmployeeId, RequestId};
use crate::error::EngineError;
use crate::leave::LeaveRequest;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct RequestLog {
    /// Requests indexed by ID for O(1) duplicate detection and lookup.
    requests: DashMap<RequestId, Arc<LeaveRequest>>,

    /// Request IDs in insertion order.
    order: Mutex<Vec<RequestId>>,
}

impl RequestLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a request.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DuplicateRequest`] if a request with the same
    /// ID already exists.
    pub fn insert(&self, request: Arc<LeaveRequest>) -> Result<(), EngineError> {
        let request_id = request.id;

        // Entry API for atomic check-and-insert. The order list is locked
        // only after the map guard is released.
        match self.requests.entry(request_id) {
            Entry::Occupied(_) => return Err(EngineError::DuplicateRequest),
            Entry::Vacant(entry) => {
                entry.insert(request);
            }
        }
        self.order.lock().push(request_id);
        Ok(())
    }

    /// Replaces an existing request in place, keeping its history position.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownRequest`] if no request with this ID
    /// exists.
    pub fn replace(&self, request: Arc<LeaveRequest>) -> Result<(), EngineError> {
        match self.requests.entry(request.id) {
            Entry::Occupied(mut entry) => {
                entry.insert(request);
                Ok(())
            }
            Entry::Vacant(_) => Err(EngineError::UnknownRequest),
        }
    }

    /// Removes a request, returning it if present.
    pub fn remove(&self, request_id: &RequestId) -> Option<Arc<LeaveRequest>> {
        let removed = self.requests.remove(request_id).map(|(_, request)| request);
        if removed.is_some() {
            self.order.lock().retain(|id| id != request_id);
        }
        removed
    }

    pub fn get(&self, request_id: &RequestId) -> Option<Arc<LeaveRequest>> {
        self.requests.get(request_id).map(|entry| Arc::clone(&entry))
    }

    pub fn contains(&self, request_id: &RequestId) -> bool {
        self.requests.contains_key(request_id)
    }

    /// All requests of one employee, oldest first.
    pub fn for_employee(&self, employee_id: EmployeeId) -> Vec<Arc<LeaveRequest>> {
        let order = self.order.lock();
        order
            .iter()
            .filter_map(|id| self.requests.get(id))
            .filter(|request| request.employee_id == employee_id)
            .map(|entry| Arc::clone(&entry))
            .collect()
    }

    /// Drops all requests of one employee (cascading delete), returning how
    /// many were removed.
    pub fn remove_employee(&self, employee_id: EmployeeId) -> usize {
        let mut order = self.order.lock();
        let mut removed = 0;
        self.requests.retain(|_, request| {
            let matches = request.employee_id == employee_id;
            if matches {
                removed += 1;
            }
            !matches
        });
        order.retain(|id| self.requests.contains_key(id));
        removed
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}
