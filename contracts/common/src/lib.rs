//! Shared building blocks for the reward token and staker contracts.
//!
//! This crate provides:
//! - [`ContractError`] — the error taxonomy used by both contracts.
//! - [`ownership`] — single-owner access control with a two-step handover.
//! - [`ttl`] — persistent/instance storage lifetime helpers.
//!
//! Both contracts return the same error enum so a failure raised by the token
//! during a cross-contract call reaches the pool's caller with its original
//! code intact.

#![no_std]

use soroban_sdk::contracterror;

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod ownership;
pub mod ttl;

// ── Shared error enum ────────────────────────────────────────────────────────

/// Error codes shared by the reward token and the staker.
///
/// # Code ranges
/// | Range   | Purpose                        |
/// |---------|--------------------------------|
/// | 1 – 9   | Lifecycle / initialisation     |
/// | 10 – 19 | Authorisation                  |
/// | 30 – 39 | Validation / input             |
/// | 40 – 49 | Ledger bookkeeping             |
/// | 50 – 59 | Staking state                  |
/// | 60 – 69 | Cross-contract plumbing        |
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    // ── Lifecycle (1–9) ──────────────────────────────────────
    /// The contract has not been initialised yet.
    NotInitialized = 1,

    /// `initialize` was called more than once.
    AlreadyInitialized = 2,

    // ── Auth (10–19) ─────────────────────────────────────────
    /// The caller is not the owner (or not the proposed owner when
    /// accepting a handover).
    Unauthorized = 10,

    /// No ownership handover is outstanding.
    NoPendingOwner = 11,

    // ── Validation (30–39) ───────────────────────────────────
    /// A configuration value is outside its allowed range, e.g. a reward
    /// rate above 100 or a negative withdraw fee.
    InvalidParameter = 30,

    /// An amount is negative, or zero where a positive amount is required.
    InvalidAmount = 31,

    // ── Ledger (40–49) ───────────────────────────────────────
    InsufficientBalance = 40,
    InsufficientAllowance = 41,

    /// Checked arithmetic would leave the `i128` range.
    Overflow = 42,

    // ── Staking (50–59) ──────────────────────────────────────
    WithdrawDisabled = 50,
    NothingStaked = 51,

    // ── Cross-contract (60–69) ───────────────────────────────
    /// The token contract trapped with something other than a
    /// [`ContractError`].
    LedgerCallFailed = 60,
}
