//! Routing of documents to thing types
//!
//! Documents arrive either with a known type id (from the record store) or
//! bare; bare documents are routed by their root element name using a
//! compile-time perfect hash map.

use crate::cholesterol::CholesterolProfile;
use crate::concern::Concern;
use crate::emotion::Emotion;
use crate::error::{Error, Result};
use crate::explanation_of_benefits::ExplanationOfBenefits;
use crate::heart_rate::HeartRate;
use crate::height::Height;
use crate::thing::Thing;
use hrecord_binding::{parse_record, WriteSettings, XmlDocument};
use phf::phf_map;
use uuid::Uuid;

/// Every thing type this crate can bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThingKind {
    Emotion,
    HeartRate,
    Concern,
    CholesterolProfile,
    Height,
    ExplanationOfBenefits,
}

static KINDS_BY_ROOT: phf::Map<&'static str, ThingKind> = phf_map! {
    "emotion" => ThingKind::Emotion,
    "heart-rate" => ThingKind::HeartRate,
    "concern" => ThingKind::Concern,
    "cholesterol-profile" => ThingKind::CholesterolProfile,
    "height" => ThingKind::Height,
    "explanation-of-benefits" => ThingKind::ExplanationOfBenefits,
};

impl ThingKind {
    pub const ALL: [ThingKind; 6] = [
        ThingKind::Emotion,
        ThingKind::HeartRate,
        ThingKind::Concern,
        ThingKind::CholesterolProfile,
        ThingKind::Height,
        ThingKind::ExplanationOfBenefits,
    ];

    pub fn type_id(self) -> Uuid {
        match self {
            ThingKind::Emotion => Emotion::TYPE_ID,
            ThingKind::HeartRate => HeartRate::TYPE_ID,
            ThingKind::Concern => Concern::TYPE_ID,
            ThingKind::CholesterolProfile => CholesterolProfile::TYPE_ID,
            ThingKind::Height => Height::TYPE_ID,
            ThingKind::ExplanationOfBenefits => ExplanationOfBenefits::TYPE_ID,
        }
    }

    pub fn type_name(self) -> &'static str {
        match self {
            ThingKind::Emotion => Emotion::TYPE_NAME,
            ThingKind::HeartRate => HeartRate::TYPE_NAME,
            ThingKind::Concern => Concern::TYPE_NAME,
            ThingKind::CholesterolProfile => CholesterolProfile::TYPE_NAME,
            ThingKind::Height => Height::TYPE_NAME,
            ThingKind::ExplanationOfBenefits => ExplanationOfBenefits::TYPE_NAME,
        }
    }

    pub fn root_element(self) -> &'static str {
        match self {
            ThingKind::Emotion => Emotion::ROOT_ELEMENT,
            ThingKind::HeartRate => HeartRate::ROOT_ELEMENT,
            ThingKind::Concern => Concern::ROOT_ELEMENT,
            ThingKind::CholesterolProfile => CholesterolProfile::ROOT_ELEMENT,
            ThingKind::Height => Height::ROOT_ELEMENT,
            ThingKind::ExplanationOfBenefits => ExplanationOfBenefits::ROOT_ELEMENT,
        }
    }

    pub fn from_type_id(type_id: Uuid) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.type_id() == type_id)
    }

    pub fn from_root_element(name: &str) -> Option<Self> {
        KINDS_BY_ROOT.get(name).copied()
    }

    /// Parses `xml` as this kind; the root element must match.
    pub fn parse(self, xml: &str) -> Result<AnyThing> {
        let doc = XmlDocument::parse(xml)?;
        let root = doc.expect_root(self.root_element())?;
        let thing = match self {
            ThingKind::Emotion => AnyThing::Emotion(parse_record(root)?),
            ThingKind::HeartRate => AnyThing::HeartRate(parse_record(root)?),
            ThingKind::Concern => AnyThing::Concern(parse_record(root)?),
            ThingKind::CholesterolProfile => AnyThing::CholesterolProfile(parse_record(root)?),
            ThingKind::Height => AnyThing::Height(parse_record(root)?),
            ThingKind::ExplanationOfBenefits => {
                AnyThing::ExplanationOfBenefits(parse_record(root)?)
            }
        };
        Ok(thing)
    }
}

/// A parsed thing of any supported type.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyThing {
    Emotion(Emotion),
    HeartRate(HeartRate),
    Concern(Concern),
    CholesterolProfile(CholesterolProfile),
    Height(Height),
    ExplanationOfBenefits(ExplanationOfBenefits),
}

impl AnyThing {
    pub fn kind(&self) -> ThingKind {
        match self {
            AnyThing::Emotion(_) => ThingKind::Emotion,
            AnyThing::HeartRate(_) => ThingKind::HeartRate,
            AnyThing::Concern(_) => ThingKind::Concern,
            AnyThing::CholesterolProfile(_) => ThingKind::CholesterolProfile,
            AnyThing::Height(_) => ThingKind::Height,
            AnyThing::ExplanationOfBenefits(_) => ThingKind::ExplanationOfBenefits,
        }
    }

    pub fn summary(&self) -> String {
        match self {
            AnyThing::Emotion(thing) => thing.summary(),
            AnyThing::HeartRate(thing) => thing.summary(),
            AnyThing::Concern(thing) => thing.summary(),
            AnyThing::CholesterolProfile(thing) => thing.summary(),
            AnyThing::Height(thing) => thing.summary(),
            AnyThing::ExplanationOfBenefits(thing) => thing.summary(),
        }
    }

    pub fn to_xml_with(&self, settings: &WriteSettings) -> Result<String> {
        match self {
            AnyThing::Emotion(thing) => thing.to_xml_with(settings),
            AnyThing::HeartRate(thing) => thing.to_xml_with(settings),
            AnyThing::Concern(thing) => thing.to_xml_with(settings),
            AnyThing::CholesterolProfile(thing) => thing.to_xml_with(settings),
            AnyThing::Height(thing) => thing.to_xml_with(settings),
            AnyThing::ExplanationOfBenefits(thing) => thing.to_xml_with(settings),
        }
    }
}

/// Parses a document whose type id is known.
pub fn parse_thing(type_id: Uuid, xml: &str) -> Result<AnyThing> {
    let kind = ThingKind::from_type_id(type_id).ok_or(Error::UnknownTypeId(type_id))?;
    tracing::debug!(%type_id, kind = kind.type_name(), "routing by type id");
    kind.parse(xml)
}

/// Parses a document, choosing the thing type from its root element.
pub fn parse_document(xml: &str) -> Result<AnyThing> {
    let doc = XmlDocument::parse(xml)?;
    let root = doc.root();
    let kind = ThingKind::from_root_element(root.name())
        .ok_or_else(|| Error::UnknownRootElement(root.name().to_string()))?;
    tracing::debug!(root = root.name(), kind = kind.type_name(), "routing by root element");
    kind.parse(xml)
}
