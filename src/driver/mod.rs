//! Driver module: the character-queue animation driver.
//!
//! ```text
//!  add_chunk("Hel")  add_chunk("lo")
//!        │                 │
//!        ▼                 ▼
//!  ┌──────────────────────────────┐   one char per step   ┌─────────┐
//!  │ queue: H e l l o             │ ────────────────────▶ │ Surface │
//!  └──────────────────────────────┘                       └─────────┘
//!        ▲ StepTimer (≤ 1 armed)      paced by Clock
//! ```

mod animator;
mod clock;
mod timer;

pub use animator::{DriverState, StreamingAnimator};
pub use clock::{Clock, ManualClock, SystemClock};
pub use timer::StepTimer;
