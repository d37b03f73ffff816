//! Pending borrow requests.
//!
//! VIP requests sit in a max-heap served by ascending user id; normal
//! requests sit in a FIFO queue that is only fed under
//! [`ReservationPolicy::AcceptNormal`].

use std::{
    cmp::Ordering,
    collections::{BinaryHeap, VecDeque},
    fmt,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    book::BookId,
    error::LibraryError,
    users::{UserId, UserRegistry},
};

/// Service class of a reservation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Priority {
    /// Served before every normal reservation
    Vip,
    /// Served first come, first served after the VIP queue
    #[default]
    Normal,
}

impl Priority {
    /// Priority for a VIP flag
    #[must_use]
    pub fn from_vip(vip: bool) -> Self {
        if vip { Self::Vip } else { Self::Normal }
    }

    /// Whether this is the VIP class
    #[must_use]
    pub fn is_vip(self) -> bool {
        self == Self::Vip
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vip => write!(f, "VIP"),
            Self::Normal => write!(f, "normal"),
        }
    }
}

/// Which reservations the queue accepts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ReservationPolicy {
    /// Normal reservations are turned away and never queued
    #[default]
    VipOnly,
    /// Normal reservations are queued FIFO behind the VIP ones
    AcceptNormal,
}

/// A request by a user to borrow a book later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Reservation {
    /// Requesting user
    pub user_id: UserId,
    /// Requested book
    pub book_id: BookId,
    /// Service class
    pub priority: Priority,
}

/// Heap entry for a VIP reservation
#[derive(Debug, Clone, Copy)]
struct VipEntry {
    /// The queued reservation
    reservation: Reservation,
    /// Submission counter, orders entries of the same user
    sequence: u64,
}

impl Ord for VipEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Max-heap: lower user ids and earlier submissions compare greater.
        other
            .reservation
            .user_id
            .cmp(&self.reservation.user_id)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for VipEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for VipEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for VipEntry {}

/// The two reservation sub-queues
#[derive(Debug, Clone, Default)]
pub struct ReservationQueue {
    /// VIP reservations by priority
    vip: BinaryHeap<VipEntry>,
    /// Normal reservations by arrival
    normal: VecDeque<Reservation>,
    /// Admission policy for normal reservations
    policy: ReservationPolicy,
    /// Next VIP submission counter
    next_sequence: u64,
}

impl ReservationQueue {
    /// Create an empty queue with the given admission policy
    #[must_use]
    pub fn new(policy: ReservationPolicy) -> Self {
        Self { policy, ..Self::default() }
    }

    /// Admission policy in force
    #[must_use]
    pub fn policy(&self) -> ReservationPolicy {
        self.policy
    }

    /// Queue a reservation for a registered user
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::UnknownUser` if the user is not registered, or
    /// `LibraryError::NormalReservationRejected` for a normal reservation
    /// under [`ReservationPolicy::VipOnly`]. The queue is unchanged on error.
    pub fn submit(
        &mut self,
        users: &UserRegistry,
        user_id: UserId,
        book_id: BookId,
        priority: Priority,
    ) -> Result<Reservation, LibraryError> {
        if !users.contains(user_id) {
            return Err(LibraryError::UnknownUser { user_id });
        }

        let reservation = Reservation { user_id, book_id, priority };
        match (priority, self.policy) {
            (Priority::Vip, _) => {
                let sequence = self.next_sequence;
                self.next_sequence = self.next_sequence.wrapping_add(1);
                self.vip.push(VipEntry { reservation, sequence });
            }
            (Priority::Normal, ReservationPolicy::AcceptNormal) => {
                self.normal.push_back(reservation);
            }
            (Priority::Normal, ReservationPolicy::VipOnly) => {
                return Err(LibraryError::NormalReservationRejected { user_id });
            }
        }

        debug!(%user_id, %book_id, %priority, pending = self.len(), "reservation queued");
        Ok(reservation)
    }

    /// Take the next reservation to serve: VIP first, then normal FIFO
    pub fn pop_next(&mut self) -> Option<Reservation> {
        self.vip
            .pop()
            .map(|entry| entry.reservation)
            .or_else(|| self.normal.pop_front())
    }

    /// Pending reservations in the order they would be served
    #[must_use]
    pub fn pending(&self) -> Vec<Reservation> {
        let mut vip = self.vip.clone().into_sorted_vec();
        vip.reverse();
        vip.into_iter()
            .map(|entry| entry.reservation)
            .chain(self.normal.iter().copied())
            .collect()
    }

    /// Number of pending VIP reservations
    #[must_use]
    pub fn vip_len(&self) -> usize {
        self.vip.len()
    }

    /// Number of pending normal reservations
    #[must_use]
    pub fn normal_len(&self) -> usize {
        self.normal.len()
    }

    /// Total pending reservations
    #[must_use]
    pub fn len(&self) -> usize {
        self.vip.len().saturating_add(self.normal.len())
    }

    /// Whether nothing is pending
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vip.is_empty() && self.normal.is_empty()
    }
}
