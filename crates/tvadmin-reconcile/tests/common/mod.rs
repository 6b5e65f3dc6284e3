//! Shared fixtures: an in-memory remote API that applies mutations to its
//! own state and counts every call.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use tvadmin_core::{
    ApiError, ApiResult, Confirm, Device, Group, GroupShare, OnlineState, ReconcileError,
    ReconcileResult, RemoteApi, SharePermission, User,
};

#[derive(Default)]
struct State {
    devices: Vec<Device>,
    groups: Vec<Group>,
    users: Vec<User>,
}

/// Mock remote API backed by mutable in-memory state.
#[derive(Default)]
pub struct MockApi {
    state: Mutex<State>,
    fail_create_group: Mutex<bool>,
    fail_move_for: Mutex<HashSet<String>>,
    fail_share_for: Mutex<HashSet<String>>,
    fail_delete_for: Mutex<HashSet<String>>,
    fail_fetch_groups: Mutex<bool>,
    next_id: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub move_calls: AtomicUsize,
    pub share_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
}

fn server_error() -> ApiError {
    ApiError::Status {
        status: 500,
        message: "internal error".to_string(),
    }
}

impl MockApi {
    pub fn new(devices: Vec<Device>, groups: Vec<Group>, users: Vec<User>) -> Self {
        Self {
            state: Mutex::new(State {
                devices,
                groups,
                users,
            }),
            next_id: AtomicUsize::new(100),
            ..Self::default()
        }
    }

    pub fn with_create_group_error(self) -> Self {
        *self.fail_create_group.lock().unwrap() = true;
        self
    }

    pub fn with_move_error(self, device_id: &str) -> Self {
        self.fail_move_for.lock().unwrap().insert(device_id.to_string());
        self
    }

    pub fn with_share_error(self, group_name: &str) -> Self {
        self.fail_share_for.lock().unwrap().insert(group_name.to_string());
        self
    }

    pub fn with_delete_error(self, device_id: &str) -> Self {
        self.fail_delete_for.lock().unwrap().insert(device_id.to_string());
        self
    }

    pub fn with_fetch_groups_error(self) -> Self {
        *self.fail_fetch_groups.lock().unwrap() = true;
        self
    }

    pub fn mutating_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
            + self.move_calls.load(Ordering::SeqCst)
            + self.share_calls.load(Ordering::SeqCst)
            + self.delete_calls.load(Ordering::SeqCst)
    }

    pub fn reset_counters(&self) {
        self.create_calls.store(0, Ordering::SeqCst);
        self.move_calls.store(0, Ordering::SeqCst);
        self.share_calls.store(0, Ordering::SeqCst);
        self.delete_calls.store(0, Ordering::SeqCst);
    }

    pub fn groups(&self) -> Vec<Group> {
        self.state.lock().unwrap().groups.clone()
    }

    pub fn device(&self, id: &str) -> Option<Device> {
        self.state
            .lock()
            .unwrap()
            .devices
            .iter()
            .find(|d| d.id == id)
            .cloned()
    }

    pub fn device_ids(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .devices
            .iter()
            .map(|d| d.id.clone())
            .collect()
    }
}

#[async_trait]
impl RemoteApi for MockApi {
    async fn fetch_devices(&self) -> ApiResult<Vec<Device>> {
        Ok(self.state.lock().unwrap().devices.clone())
    }

    async fn fetch_groups(&self) -> ApiResult<Vec<Group>> {
        if *self.fail_fetch_groups.lock().unwrap() {
            return Err(ApiError::Unauthorized("token rejected".to_string()));
        }
        Ok(self.state.lock().unwrap().groups.clone())
    }

    async fn fetch_users(&self) -> ApiResult<Vec<User>> {
        Ok(self.state.lock().unwrap().users.clone())
    }

    async fn create_group(&self, name: &str) -> ApiResult<Group> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail_create_group.lock().unwrap() {
            return Err(server_error());
        }
        let id = format!("g{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let group = Group::new(id, name);
        self.state.lock().unwrap().groups.push(group.clone());
        Ok(group)
    }

    async fn move_device_to_group(&self, device_id: &str, group_id: &str) -> ApiResult<()> {
        self.move_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_move_for.lock().unwrap().contains(device_id) {
            return Err(server_error());
        }
        let mut state = self.state.lock().unwrap();
        let device = state
            .devices
            .iter_mut()
            .find(|d| d.id == device_id)
            .ok_or_else(|| ApiError::NotFound(device_id.to_string()))?;
        device.group_id = Some(group_id.to_string());
        Ok(())
    }

    async fn share_group(
        &self,
        group_id: &str,
        user_id: &str,
        permission: SharePermission,
    ) -> ApiResult<()> {
        self.share_calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        let group = state
            .groups
            .iter_mut()
            .find(|g| g.id == group_id)
            .ok_or_else(|| ApiError::NotFound(group_id.to_string()))?;
        if self.fail_share_for.lock().unwrap().contains(&group.name) {
            return Err(server_error());
        }
        group.shares.push(GroupShare {
            user_id: user_id.to_string(),
            permission,
        });
        Ok(())
    }

    async fn delete_device(&self, device_id: &str) -> ApiResult<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete_for.lock().unwrap().contains(device_id) {
            return Err(server_error());
        }
        self.state
            .lock()
            .unwrap()
            .devices
            .retain(|d| d.id != device_id);
        Ok(())
    }
}

/// Confirmation stub with a fixed answer; `None` means nobody can be asked.
pub struct FixedConfirm {
    answer: Option<bool>,
    pub asked: AtomicUsize,
}

impl FixedConfirm {
    pub fn yes() -> Self {
        Self::with(Some(true))
    }

    pub fn no() -> Self {
        Self::with(Some(false))
    }

    pub fn unavailable() -> Self {
        Self::with(None)
    }

    fn with(answer: Option<bool>) -> Self {
        Self {
            answer,
            asked: AtomicUsize::new(0),
        }
    }

    pub fn times_asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }
}

impl Confirm for FixedConfirm {
    fn confirm(&self, _prompt: &str) -> ReconcileResult<bool> {
        self.asked.fetch_add(1, Ordering::SeqCst);
        self.answer.ok_or(ReconcileError::ConfirmationUnavailable)
    }
}

// =============================================================================
// Builders
// =============================================================================

pub fn day(n: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, n, 8, 30, 0).unwrap()
}

pub fn user(id: &str, email: &str) -> User {
    User {
        id: id.to_string(),
        email: email.to_string(),
        name: email.split('@').next().unwrap_or(email).to_string(),
    }
}

pub fn device(id: &str, name: &str) -> Device {
    Device {
        id: id.to_string(),
        name: name.to_string(),
        teamviewer_id: None,
        group_id: None,
        online: OnlineState::Online,
        last_seen: None,
        assigned_to_caller: true,
    }
}

pub fn device_in(id: &str, name: &str, group_id: &str) -> Device {
    Device {
        group_id: Some(group_id.to_string()),
        ..device(id, name)
    }
}

pub fn offline(id: &str, name: &str, seen: Option<DateTime<Utc>>) -> Device {
    Device {
        online: OnlineState::Offline,
        last_seen: seen,
        ..device(id, name)
    }
}
