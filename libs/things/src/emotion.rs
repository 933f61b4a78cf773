//! Emotional state at a point in time.

use crate::thing::Thing;
use hrecord_binding::{
    ordinal_enum, require, Bindable, Clock, OrdinalEnum, Result, XmlNode, XmlSink,
};
use hrecord_types::HealthServiceDateTime;
use uuid::Uuid;

ordinal_enum! {
    pub enum Mood {
        Depressed = 1,
        Sad = 2,
        Neutral = 3,
        Happy = 4,
        Elated = 5,
    }
}

ordinal_enum! {
    pub enum StressLevel {
        Relaxed = 1,
        Mild = 2,
        Moderate = 3,
        Severe = 4,
        Extreme = 5,
    }
}

ordinal_enum! {
    pub enum Wellbeing {
        Sick = 1,
        Impaired = 2,
        Able = 3,
        Healthy = 4,
        Vigorous = 5,
    }
}

/// ```xml
/// <emotion>
///   <when>...</when>
///   <mood>4</mood>
///   <stress>2</stress>
///   <wellbeing>4</wellbeing>
/// </emotion>
/// ```
///
/// The three scales default to `Unknown`, which is never written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Emotion {
    when: Option<HealthServiceDateTime>,
    pub mood: Mood,
    pub stress: StressLevel,
    pub wellbeing: Wellbeing,
}

impl Emotion {
    /// An emotion recorded now, according to `clock`.
    pub fn new(clock: &dyn Clock) -> Result<Self> {
        Ok(Self::at(HealthServiceDateTime::now(clock)?))
    }

    pub fn at(when: HealthServiceDateTime) -> Self {
        Self {
            when: Some(when),
            ..Self::default()
        }
    }

    pub fn when(&self) -> Option<&HealthServiceDateTime> {
        self.when.as_ref()
    }

    pub fn set_when(&mut self, when: HealthServiceDateTime) {
        self.when = Some(when);
    }
}

impl Bindable for Emotion {
    const RECORD: &'static str = "Emotion";

    fn parse_xml(&mut self, node: XmlNode<'_, '_>) -> Result<()> {
        *self = Self {
            when: node.read_record("when")?,
            mood: node.read_enum("mood")?.unwrap_or_default(),
            stress: node.read_enum("stress")?.unwrap_or_default(),
            wellbeing: node.read_enum("wellbeing")?.unwrap_or_default(),
        };
        Ok(())
    }

    fn ensure_complete(&self) -> Result<()> {
        require(Self::RECORD, "when", &self.when)?.ensure_complete()
    }

    fn write_body(&self, sink: &mut XmlSink) -> Result<()> {
        sink.record("when", require(Self::RECORD, "when", &self.when)?)?;
        sink.enumeration("mood", self.mood)?;
        sink.enumeration("stress", self.stress)?;
        sink.enumeration("wellbeing", self.wellbeing)
    }
}

impl Thing for Emotion {
    const TYPE_ID: Uuid = Uuid::from_u128(0x4b7971d6_e427_427d_bf2c_2fbcf76606b3);
    const TYPE_NAME: &'static str = "Emotion";
    const ROOT_ELEMENT: &'static str = "emotion";

    fn summary(&self) -> String {
        let mut parts = Vec::new();
        if !self.mood.is_unknown() {
            parts.push(format!("Mood: {}", self.mood));
        }
        if !self.stress.is_unknown() {
            parts.push(format!("Stress: {}", self.stress));
        }
        if !self.wellbeing.is_unknown() {
            parts.push(format!("Wellbeing: {}", self.wellbeing));
        }
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use hrecord_binding::{Error, FixedClock};

    fn clock() -> FixedClock {
        FixedClock(
            NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
        )
    }

    #[test]
    fn new_takes_when_from_clock() {
        let emotion = Emotion::new(&clock()).unwrap();
        assert_eq!(emotion.when().unwrap().to_string(), "2024-03-01 09:30:00.000");
        assert_eq!(emotion.mood, Mood::Unknown);
    }

    #[test]
    fn unknown_scales_are_omitted() {
        let mut emotion = Emotion::new(&clock()).unwrap();
        emotion.mood = Mood::Happy;
        let xml = emotion.to_xml().unwrap();
        assert!(xml.contains("<mood>4</mood>"));
        assert!(!xml.contains("<stress>"));
        assert!(!xml.contains("<wellbeing>"));
        assert_eq!(emotion.summary(), "Mood: Happy");
    }

    #[test]
    fn summary_uses_scale_names() {
        let mut emotion = Emotion::new(&clock()).unwrap();
        emotion.mood = Mood::Sad;
        emotion.stress = StressLevel::Moderate;
        emotion.wellbeing = Wellbeing::Impaired;
        assert_eq!(
            emotion.summary(),
            "Mood: Sad, Stress: Moderate, Wellbeing: Impaired"
        );
    }

    #[test]
    fn newer_ordinals_degrade_to_unknown() {
        let xml = "<emotion><when><date><y>2024</y><m>3</m><d>1</d></date></when>\
                   <mood>9</mood><stress>5</stress></emotion>";
        let emotion = Emotion::from_xml(xml).unwrap();
        assert!(emotion.mood.is_unknown());
        assert_eq!(emotion.stress, StressLevel::Extreme);
        assert_eq!(Wellbeing::from_ordinal(3), Wellbeing::Able);
    }

    #[test]
    fn when_is_mandatory() {
        let err = Emotion::default().to_xml().unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Binding(Error::MissingMandatory {
                record: "Emotion",
                field: "when"
            })
        ));
    }
}
