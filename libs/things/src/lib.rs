//! Health record things
//!
//! A *thing* is a top-level record stored by the health record service,
//! identified by a stable type id and written under a fixed root element.
//! Each type implements [`Thing`] on top of the [`hrecord_binding::Bindable`]
//! contract; [`parse_document`] and [`parse_thing`] route an incoming
//! document to the right type.
//!
//! # Example
//!
//! ```rust
//! use hrecord_things::{parse_document, AnyThing, ThingKind};
//!
//! let xml = "<concern><description><text>Back pain</text></description></concern>";
//! let thing = parse_document(xml).unwrap();
//! assert_eq!(thing.kind(), ThingKind::Concern);
//! assert_eq!(thing.summary(), "Back pain");
//! assert!(matches!(thing, AnyThing::Concern(_)));
//! ```

#![forbid(unsafe_code)]

mod cholesterol;
mod concern;
mod emotion;
mod error;
mod explanation_of_benefits;
mod heart_rate;
mod height;
mod registry;
mod thing;

pub use cholesterol::CholesterolProfile;
pub use concern::Concern;
pub use emotion::{Emotion, Mood, StressLevel, Wellbeing};
pub use error::{Error, Result};
pub use explanation_of_benefits::{ExplanationOfBenefits, Service};
pub use heart_rate::HeartRate;
pub use height::Height;
pub use registry::{parse_document, parse_thing, AnyThing, ThingKind};
pub use thing::Thing;
