//! Lipid panel results.

use crate::thing::Thing;
use hrecord_binding::validate::ensure_at_least;
use hrecord_binding::{require, Bindable, Clock, Result, XmlNode, XmlSink};
use hrecord_types::HealthServiceDate;
use uuid::Uuid;

/// Cholesterol and triglyceride levels in mg/dL, measured on `when`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CholesterolProfile {
    when: Option<HealthServiceDate>,
    ldl: Option<i32>,
    hdl: Option<i32>,
    total_cholesterol: Option<i32>,
    triglyceride: Option<i32>,
}

fn check_level(field: &'static str, level: Option<i32>) -> Result<Option<i32>> {
    level.map(|l| ensure_at_least(field, l, 0)).transpose()
}

impl CholesterolProfile {
    /// A profile dated today, according to `clock`.
    pub fn new(clock: &dyn Clock) -> Result<Self> {
        Ok(Self::on(HealthServiceDate::from_date(clock.now().date())?))
    }

    pub fn on(when: HealthServiceDate) -> Self {
        Self {
            when: Some(when),
            ..Self::default()
        }
    }

    pub fn when(&self) -> Option<&HealthServiceDate> {
        self.when.as_ref()
    }

    pub fn ldl(&self) -> Option<i32> {
        self.ldl
    }

    pub fn hdl(&self) -> Option<i32> {
        self.hdl
    }

    pub fn total_cholesterol(&self) -> Option<i32> {
        self.total_cholesterol
    }

    pub fn triglyceride(&self) -> Option<i32> {
        self.triglyceride
    }

    pub fn set_when(&mut self, when: HealthServiceDate) {
        self.when = Some(when);
    }

    pub fn set_ldl(&mut self, ldl: Option<i32>) -> Result<()> {
        self.ldl = check_level("ldl", ldl)?;
        Ok(())
    }

    pub fn set_hdl(&mut self, hdl: Option<i32>) -> Result<()> {
        self.hdl = check_level("hdl", hdl)?;
        Ok(())
    }

    pub fn set_total_cholesterol(&mut self, total: Option<i32>) -> Result<()> {
        self.total_cholesterol = check_level("total-cholesterol", total)?;
        Ok(())
    }

    pub fn set_triglyceride(&mut self, triglyceride: Option<i32>) -> Result<()> {
        self.triglyceride = check_level("triglyceride", triglyceride)?;
        Ok(())
    }
}

impl Bindable for CholesterolProfile {
    const RECORD: &'static str = "CholesterolProfile";

    fn parse_xml(&mut self, node: XmlNode<'_, '_>) -> Result<()> {
        let mut parsed = Self {
            when: node.read_record("when")?,
            ..Self::default()
        };
        parsed.set_ldl(node.read("ldl")?)?;
        parsed.set_hdl(node.read("hdl")?)?;
        parsed.set_total_cholesterol(node.read("total-cholesterol")?)?;
        parsed.set_triglyceride(node.read("triglyceride")?)?;
        *self = parsed;
        Ok(())
    }

    fn ensure_complete(&self) -> Result<()> {
        require(Self::RECORD, "when", &self.when)?.ensure_complete()
    }

    fn write_body(&self, sink: &mut XmlSink) -> Result<()> {
        sink.record("when", require(Self::RECORD, "when", &self.when)?)?;
        sink.optional("ldl", self.ldl.as_ref())?;
        sink.optional("hdl", self.hdl.as_ref())?;
        sink.optional("total-cholesterol", self.total_cholesterol.as_ref())?;
        sink.optional("triglyceride", self.triglyceride.as_ref())
    }
}

impl Thing for CholesterolProfile {
    const TYPE_ID: Uuid = Uuid::from_u128(0x796c186f_b874_471c_8468_3eeff73bf66e);
    const TYPE_NAME: &'static str = "Cholesterol Profile";
    const ROOT_ELEMENT: &'static str = "cholesterol-profile";

    fn summary(&self) -> String {
        let levels = [
            ("LDL", self.ldl),
            ("HDL", self.hdl),
            ("Total", self.total_cholesterol),
            ("Triglyceride", self.triglyceride),
        ];
        let parts: Vec<String> = levels
            .iter()
            .filter_map(|(label, level)| level.map(|l| format!("{label} {l}")))
            .collect();
        if parts.is_empty() {
            return String::new();
        }
        format!("{} mg/dL", parts.join(", "))
    }
}
