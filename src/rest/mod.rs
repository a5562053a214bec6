//! rest
//!
//! REST transport: `/changelist/{project}[/{name}]`.
//!
//! # Surface
//!
//! | method | path | body | success |
//! |---|---|---|---|
//! | GET | `/changelist/{project}` | — | 200, `{"changelists":[...]}` |
//! | GET | `/changelist/{project}/{name}` | — | 200, single record |
//! | POST | `/changelist/{project}` | add payload | 201, empty |
//! | PUT | `/changelist/{project}/{name}` | edit payload | 204 |
//! | POST | `/changelist/{project}/{name}` | rename payload | 204 |
//! | DELETE | `/changelist/{project}/{name}` | — | 204 |
//!
//! Failures map through [`projection`]; unmatched paths are 404 and
//! unsupported methods on matched paths are 405, both produced by the router
//! itself. The REST transport never fires callbacks.

pub mod projection;
pub mod router;

pub use router::{router, serve};
