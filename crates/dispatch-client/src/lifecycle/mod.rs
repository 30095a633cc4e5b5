//! # System Lifecycle
//!
//! Starting, wiring and stopping the page.
//!
//! [`DispatchSystem::start`] follows the usual order for actor systems:
//!
//! 1. **Components** - spawn the MapView and StatusPresenter actors; the banner sink is
//!    injected as the StatusPresenter's run context.
//! 2. **Session** - a [`PageSession`] holding client clones, so a reload can reset both
//!    components and the submission state.
//! 3. **Collaborators** - location, allocation and history refresh, either supplied by
//!    the host or built from the configuration around one shared `reqwest::Client`.
//! 4. **Orchestrator** - wired last, holding clients only.
//!
//! ## Shutdown
//!
//! Actors stop when every clone of their client is gone. [`DispatchSystem::shutdown`]
//! cancels any pending reload timer (which holds the session, and through it the
//! clients), drops its own clients and awaits both actor tasks.

pub mod dispatch_system;
pub mod session;

pub use dispatch_system::*;
pub use session::*;
