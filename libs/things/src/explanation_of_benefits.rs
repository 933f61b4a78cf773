//! Insurance explanation of benefits for a submitted claim.

use crate::thing::Thing;
use hrecord_binding::validate::{ensure_optional_text, ensure_text};
use hrecord_binding::{require, require_items, Bindable, Result, TextPolicy, XmlNode, XmlSink};
use hrecord_types::{
    ClaimAmounts, CodableValue, DurationValue, HealthServiceDateTime, Organization, PersonItem,
};
use uuid::Uuid;

/// One billed service within a claim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Service {
    service_type: Option<CodableValue>,
    diagnosis_codes: Vec<CodableValue>,
    billing_code: Option<CodableValue>,
    service_dates: Option<DurationValue>,
    claim_amounts: Option<ClaimAmounts>,
    notes: Vec<String>,
}

impl Service {
    pub fn new(
        service_type: CodableValue,
        service_dates: DurationValue,
        claim_amounts: ClaimAmounts,
    ) -> Self {
        Self {
            service_type: Some(service_type),
            service_dates: Some(service_dates),
            claim_amounts: Some(claim_amounts),
            ..Self::default()
        }
    }

    pub fn service_type(&self) -> Option<&CodableValue> {
        self.service_type.as_ref()
    }

    pub fn diagnosis_codes(&self) -> &[CodableValue] {
        &self.diagnosis_codes
    }

    pub fn diagnosis_codes_mut(&mut self) -> &mut Vec<CodableValue> {
        &mut self.diagnosis_codes
    }

    pub fn billing_code(&self) -> Option<&CodableValue> {
        self.billing_code.as_ref()
    }

    pub fn service_dates(&self) -> Option<&DurationValue> {
        self.service_dates.as_ref()
    }

    pub fn claim_amounts(&self) -> Option<&ClaimAmounts> {
        self.claim_amounts.as_ref()
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    pub fn notes_mut(&mut self) -> &mut Vec<String> {
        &mut self.notes
    }

    pub fn set_service_type(&mut self, service_type: CodableValue) {
        self.service_type = Some(service_type);
    }

    pub fn set_billing_code(&mut self, billing_code: Option<CodableValue>) {
        self.billing_code = billing_code;
    }

    pub fn set_service_dates(&mut self, service_dates: DurationValue) {
        self.service_dates = Some(service_dates);
    }

    pub fn set_claim_amounts(&mut self, claim_amounts: ClaimAmounts) {
        self.claim_amounts = Some(claim_amounts);
    }
}

impl Bindable for Service {
    const RECORD: &'static str = "Service";

    fn parse_xml(&mut self, node: XmlNode<'_, '_>) -> Result<()> {
        *self = Self {
            service_type: node.read_record("service-type")?,
            diagnosis_codes: node.read_records("diagnosis-codes")?,
            billing_code: node.read_record("billing-code")?,
            service_dates: node.read_record("service-dates")?,
            claim_amounts: node.read_record("claim-amounts")?,
            notes: node.read_texts("notes"),
        };
        Ok(())
    }

    fn ensure_complete(&self) -> Result<()> {
        require(Self::RECORD, "service-type", &self.service_type)?.ensure_complete()?;
        for code in self.diagnosis_codes.iter().chain(&self.billing_code) {
            code.ensure_complete()?;
        }
        require(Self::RECORD, "service-dates", &self.service_dates)?.ensure_complete()?;
        require(Self::RECORD, "claim-amounts", &self.claim_amounts)?.ensure_complete()
    }

    fn write_body(&self, sink: &mut XmlSink) -> Result<()> {
        sink.record(
            "service-type",
            require(Self::RECORD, "service-type", &self.service_type)?,
        )?;
        sink.records("diagnosis-codes", &self.diagnosis_codes)?;
        sink.optional_record("billing-code", self.billing_code.as_ref())?;
        sink.record(
            "service-dates",
            require(Self::RECORD, "service-dates", &self.service_dates)?,
        )?;
        sink.record(
            "claim-amounts",
            require(Self::RECORD, "claim-amounts", &self.claim_amounts)?,
        )?;
        sink.texts("notes", &self.notes)
    }
}

/// Statement from a health plan describing how a claim was processed.
///
/// Every element except `relationship-to-member` and `group-id` is
/// mandatory, and at least one service is required.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExplanationOfBenefits {
    date_submitted: Option<HealthServiceDateTime>,
    patient: Option<PersonItem>,
    relationship_to_member: Option<CodableValue>,
    plan: Option<Organization>,
    member_id: Option<String>,
    group_id: Option<String>,
    claim_type: Option<CodableValue>,
    claim_id: Option<String>,
    submitted_by: Option<Organization>,
    provider: Option<Organization>,
    currency: Option<CodableValue>,
    claim_totals: Option<ClaimAmounts>,
    services: Vec<Service>,
}

impl ExplanationOfBenefits {
    pub fn date_submitted(&self) -> Option<&HealthServiceDateTime> {
        self.date_submitted.as_ref()
    }

    pub fn patient(&self) -> Option<&PersonItem> {
        self.patient.as_ref()
    }

    pub fn relationship_to_member(&self) -> Option<&CodableValue> {
        self.relationship_to_member.as_ref()
    }

    pub fn plan(&self) -> Option<&Organization> {
        self.plan.as_ref()
    }

    pub fn member_id(&self) -> Option<&str> {
        self.member_id.as_deref()
    }

    pub fn group_id(&self) -> Option<&str> {
        self.group_id.as_deref()
    }

    pub fn claim_type(&self) -> Option<&CodableValue> {
        self.claim_type.as_ref()
    }

    pub fn claim_id(&self) -> Option<&str> {
        self.claim_id.as_deref()
    }

    pub fn submitted_by(&self) -> Option<&Organization> {
        self.submitted_by.as_ref()
    }

    pub fn provider(&self) -> Option<&Organization> {
        self.provider.as_ref()
    }

    pub fn currency(&self) -> Option<&CodableValue> {
        self.currency.as_ref()
    }

    pub fn claim_totals(&self) -> Option<&ClaimAmounts> {
        self.claim_totals.as_ref()
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn services_mut(&mut self) -> &mut Vec<Service> {
        &mut self.services
    }

    pub fn set_date_submitted(&mut self, date_submitted: HealthServiceDateTime) {
        self.date_submitted = Some(date_submitted);
    }

    pub fn set_patient(&mut self, patient: PersonItem) {
        self.patient = Some(patient);
    }

    pub fn set_relationship_to_member(&mut self, relationship: Option<CodableValue>) {
        self.relationship_to_member = relationship;
    }

    pub fn set_plan(&mut self, plan: Organization) {
        self.plan = Some(plan);
    }

    pub fn set_member_id(&mut self, member_id: impl Into<String>) -> Result<()> {
        self.member_id = Some(ensure_text(
            "member-id",
            member_id.into(),
            TextPolicy::NotWhitespace,
        )?);
        Ok(())
    }

    pub fn set_group_id(&mut self, group_id: Option<String>) -> Result<()> {
        self.group_id = ensure_optional_text("group-id", group_id, TextPolicy::NotWhitespace)?;
        Ok(())
    }

    pub fn set_claim_type(&mut self, claim_type: CodableValue) {
        self.claim_type = Some(claim_type);
    }

    pub fn set_claim_id(&mut self, claim_id: impl Into<String>) -> Result<()> {
        self.claim_id = Some(ensure_text(
            "claim-id",
            claim_id.into(),
            TextPolicy::NotWhitespace,
        )?);
        Ok(())
    }

    pub fn set_submitted_by(&mut self, submitted_by: Organization) {
        self.submitted_by = Some(submitted_by);
    }

    pub fn set_provider(&mut self, provider: Organization) {
        self.provider = Some(provider);
    }

    pub fn set_currency(&mut self, currency: CodableValue) {
        self.currency = Some(currency);
    }

    pub fn set_claim_totals(&mut self, claim_totals: ClaimAmounts) {
        self.claim_totals = Some(claim_totals);
    }
}

impl Bindable for ExplanationOfBenefits {
    const RECORD: &'static str = "ExplanationOfBenefits";

    fn parse_xml(&mut self, node: XmlNode<'_, '_>) -> Result<()> {
        let mut parsed = Self {
            date_submitted: node.read_record("date-submitted")?,
            patient: node.read_record("patient")?,
            relationship_to_member: node.read_record("relationship-to-member")?,
            plan: node.read_record("plan")?,
            claim_type: node.read_record("claim-type")?,
            submitted_by: node.read_record("submitted-by")?,
            provider: node.read_record("provider")?,
            currency: node.read_record("currency")?,
            claim_totals: node.read_record("claim-totals")?,
            services: node.read_records("services")?,
            ..Self::default()
        };
        if let Some(member_id) = node.read_text("member-id") {
            parsed.set_member_id(member_id)?;
        }
        parsed.set_group_id(node.read_text("group-id"))?;
        if let Some(claim_id) = node.read_text("claim-id") {
            parsed.set_claim_id(claim_id)?;
        }
        *self = parsed;
        Ok(())
    }

    fn ensure_complete(&self) -> Result<()> {
        require(Self::RECORD, "date-submitted", &self.date_submitted)?.ensure_complete()?;
        require(Self::RECORD, "patient", &self.patient)?.ensure_complete()?;
        if let Some(relationship) = &self.relationship_to_member {
            relationship.ensure_complete()?;
        }
        require(Self::RECORD, "plan", &self.plan)?.ensure_complete()?;
        require(Self::RECORD, "member-id", &self.member_id)?;
        require(Self::RECORD, "claim-type", &self.claim_type)?.ensure_complete()?;
        require(Self::RECORD, "claim-id", &self.claim_id)?;
        require(Self::RECORD, "submitted-by", &self.submitted_by)?.ensure_complete()?;
        require(Self::RECORD, "provider", &self.provider)?.ensure_complete()?;
        require(Self::RECORD, "currency", &self.currency)?.ensure_complete()?;
        require(Self::RECORD, "claim-totals", &self.claim_totals)?.ensure_complete()?;
        require_items(Self::RECORD, "services", &self.services)?;
        for service in &self.services {
            service.ensure_complete()?;
        }
        Ok(())
    }

    fn write_body(&self, sink: &mut XmlSink) -> Result<()> {
        let record = Self::RECORD;
        sink.record(
            "date-submitted",
            require(record, "date-submitted", &self.date_submitted)?,
        )?;
        sink.record("patient", require(record, "patient", &self.patient)?)?;
        sink.optional_record("relationship-to-member", self.relationship_to_member.as_ref())?;
        sink.record("plan", require(record, "plan", &self.plan)?)?;
        sink.element("member-id", require(record, "member-id", &self.member_id)?)?;
        sink.optional("group-id", self.group_id.as_ref())?;
        sink.record("claim-type", require(record, "claim-type", &self.claim_type)?)?;
        sink.element("claim-id", require(record, "claim-id", &self.claim_id)?)?;
        sink.record(
            "submitted-by",
            require(record, "submitted-by", &self.submitted_by)?,
        )?;
        sink.record("provider", require(record, "provider", &self.provider)?)?;
        sink.record("currency", require(record, "currency", &self.currency)?)?;
        sink.record(
            "claim-totals",
            require(record, "claim-totals", &self.claim_totals)?,
        )?;
        sink.records("services", &self.services)
    }
}

impl Thing for ExplanationOfBenefits {
    const TYPE_ID: Uuid = Uuid::from_u128(0x356fbba9_e0c9_4f4f_b0d9_4594f2490d2f);
    const TYPE_NAME: &'static str = "Explanation of Benefits";
    const ROOT_ELEMENT: &'static str = "explanation-of-benefits";

    fn summary(&self) -> String {
        let mut summary = format!("Claim {}", self.claim_id.as_deref().unwrap_or("?"));
        if let Some(provider) = &self.provider {
            summary.push_str(&format!(" from {provider}"));
        }
        if let Some(totals) = &self.claim_totals {
            summary.push_str(&format!(": {totals}"));
        }
        summary
    }
}
