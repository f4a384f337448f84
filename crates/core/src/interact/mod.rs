//! Interaction layer: behaviors that read the rendered page but never write
//! back into the configuration.
//!
//! Browser callbacks (observer entries, form submits, timers) are modelled as
//! explicit calls so they can be driven deterministically.

pub mod nav;
pub mod newsletter;
pub mod timer;

pub use nav::{ActiveNav, IntersectionEntry, SectionBox};
pub use newsletter::{Newsletter, NewsletterTask, SubmitOutcome};
pub use timer::{Scheduler, TaskHandle};
