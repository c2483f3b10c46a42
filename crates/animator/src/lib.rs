//! Frame-driven field animation engine.
//!
//! A scene from `fieldconfig` is turned into a [`Field`] of sampled entities
//! that is stepped and repainted on every frame callback of a [`Host`]:
//!
//! ```text
//!   FieldConfig ──▶ Animator::from_config ──▶ mount()
//!                                               │ Host::viewport_size
//!                                               ▼
//!        Host::acquire_surface ──▶ Field::new (sampled once per viewport)
//!                                               │
//!   Host frame callback ──▶ Animator::frame ──▶ FrameClock::tick
//!                                               ├─▶ Field::step
//!                                               ├─▶ Surface::clear + Field::paint
//!                                               └─▶ Host::schedule_frame
//! ```
//!
//! Continuous motion (phases, orbits, drift, pulses) is scaled by the frame
//! delta measured against a reference frame rate, so the field moves at the
//! same speed on a 30 Hz and a 144 Hz display. Transient entities (rings
//! and sparks) age by exactly one step per drawn frame.
//!
//! [`HeadlessHost`] with its [`RecordingSurface`] runs the same engine
//! without a window; the browser host lives in the `webcanvas` crate.

mod animator;
mod clock;
pub mod entity;
mod field;
mod host;
mod sampler;
mod spawner;
mod surface;

pub use animator::{Animator, AnimatorError, Phase};
pub use clock::{FrameClock, FrameTime};
pub use field::{EntityCounts, Field};
pub use host::{FrameToken, HeadlessHost, Host, Viewport};
pub use sampler::Sampler;
pub use spawner::Spawner;
pub use surface::{DrawCommand, Point, RecordingSurface, Rgba, Stroke, Surface};
