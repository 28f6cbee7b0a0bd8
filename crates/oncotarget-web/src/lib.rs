//! oncotarget-web — Web page for the Oncotarget drug target table.
//! Provides:
//!   - The rendered target table at `/`
//!   - JSON snapshot and refresh endpoints
//!   - Liveness / readiness checks
//!   - Enrichment progress over SSE

pub mod router;
pub mod handlers;
pub mod state;
pub mod sse;
pub mod error;
pub mod templates;
