//! Monetary breakdown of an insurance claim.

use hrecord_binding::validate::ensure_range;
use hrecord_binding::{require, Bindable, Result, XmlNode, XmlSink};
use rust_decimal::Decimal;
use std::fmt;

/// Amounts charged, covered and owed for a claim or a single service.
///
/// Every amount is mandatory; `percentage-covered` is an optional fraction
/// in `[0.0, 1.0]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimAmounts {
    pub charged_amount: Option<Decimal>,
    pub negotiated_amount: Option<Decimal>,
    pub copayment: Option<Decimal>,
    pub deductible: Option<Decimal>,
    pub amount_not_covered: Option<Decimal>,
    pub eligible_for_benefits: Option<Decimal>,
    percentage_covered: Option<f64>,
    pub coinsurance: Option<Decimal>,
    pub miscellaneous_adjustments: Option<Decimal>,
    pub benefits_paid: Option<Decimal>,
    pub patient_responsibility: Option<Decimal>,
}

impl ClaimAmounts {
    /// Amounts with every mandatory field set to zero.
    pub fn zero() -> Self {
        let zero = Some(Decimal::ZERO);
        Self {
            charged_amount: zero,
            negotiated_amount: zero,
            copayment: zero,
            deductible: zero,
            amount_not_covered: zero,
            eligible_for_benefits: zero,
            percentage_covered: None,
            coinsurance: zero,
            miscellaneous_adjustments: zero,
            benefits_paid: zero,
            patient_responsibility: zero,
        }
    }

    pub fn percentage_covered(&self) -> Option<f64> {
        self.percentage_covered
    }

    pub fn set_percentage_covered(&mut self, fraction: Option<f64>) -> Result<()> {
        self.percentage_covered = fraction
            .map(|f| ensure_range("percentage-covered", f, 0.0, 1.0))
            .transpose()?;
        Ok(())
    }

    fn amounts_before_percentage(&self) -> [(&'static str, &Option<Decimal>); 6] {
        [
            ("charged-amount", &self.charged_amount),
            ("negotiated-amount", &self.negotiated_amount),
            ("co-payment", &self.copayment),
            ("deductible", &self.deductible),
            ("amount-not-covered", &self.amount_not_covered),
            ("eligible-for-benefits", &self.eligible_for_benefits),
        ]
    }

    fn amounts_after_percentage(&self) -> [(&'static str, &Option<Decimal>); 4] {
        [
            ("coinsurance", &self.coinsurance),
            ("miscellaneous-adjustments", &self.miscellaneous_adjustments),
            ("benefits-paid", &self.benefits_paid),
            ("patient-responsibility", &self.patient_responsibility),
        ]
    }
}

impl fmt::Display for ClaimAmounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount = |value: &Option<Decimal>| value.map(|v| v.normalize().to_string()).unwrap_or_default();
        write!(
            f,
            "charged {}, paid {}, patient owes {}",
            amount(&self.charged_amount),
            amount(&self.benefits_paid),
            amount(&self.patient_responsibility)
        )
    }
}

impl Bindable for ClaimAmounts {
    const RECORD: &'static str = "ClaimAmounts";

    fn parse_xml(&mut self, node: XmlNode<'_, '_>) -> Result<()> {
        let mut parsed = Self {
            charged_amount: node.read("charged-amount")?,
            negotiated_amount: node.read("negotiated-amount")?,
            copayment: node.read("co-payment")?,
            deductible: node.read("deductible")?,
            amount_not_covered: node.read("amount-not-covered")?,
            eligible_for_benefits: node.read("eligible-for-benefits")?,
            percentage_covered: None,
            coinsurance: node.read("coinsurance")?,
            miscellaneous_adjustments: node.read("miscellaneous-adjustments")?,
            benefits_paid: node.read("benefits-paid")?,
            patient_responsibility: node.read("patient-responsibility")?,
        };
        parsed.set_percentage_covered(node.read("percentage-covered")?)?;
        *self = parsed;
        Ok(())
    }

    fn ensure_complete(&self) -> Result<()> {
        let amounts = self
            .amounts_before_percentage()
            .into_iter()
            .chain(self.amounts_after_percentage());
        for (field, value) in amounts {
            require(Self::RECORD, field, value)?;
        }
        Ok(())
    }

    fn write_body(&self, sink: &mut XmlSink) -> Result<()> {
        for (field, value) in self.amounts_before_percentage() {
            sink.element(field, require(Self::RECORD, field, value)?)?;
        }
        sink.optional("percentage-covered", self.percentage_covered.as_ref())?;
        for (field, value) in self.amounts_after_percentage() {
            sink.element(field, require(Self::RECORD, field, value)?)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrecord_binding::{from_xml_str, to_xml_string, Error, WriteSettings};
    use std::str::FromStr;

    #[test]
    fn percentage_is_a_fraction() {
        let mut amounts = ClaimAmounts::zero();
        assert!(amounts.set_percentage_covered(Some(0.0)).is_ok());
        assert!(amounts.set_percentage_covered(Some(1.0)).is_ok());
        let err = amounts.set_percentage_covered(Some(80.0)).unwrap_err();
        assert!(matches!(
            err,
            Error::OutOfRange {
                field: "percentage-covered",
                ..
            }
        ));
        assert_eq!(amounts.percentage_covered(), Some(1.0));

        let err = amounts.set_percentage_covered(Some(f64::NAN)).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(amounts.percentage_covered(), Some(1.0));
    }

    #[test]
    fn every_amount_is_mandatory() {
        let mut amounts = ClaimAmounts::zero();
        amounts.benefits_paid = None;
        let err = to_xml_string(&amounts, "claim-totals", &WriteSettings::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingMandatory {
                field: "benefits-paid",
                ..
            }
        ));
    }

    #[test]
    fn amounts_round_trip_in_order() {
        let mut amounts = ClaimAmounts::zero();
        amounts.charged_amount = Some(Decimal::from_str("125.50").unwrap());
        amounts.benefits_paid = Some(Decimal::from(100));
        amounts.patient_responsibility = Some(Decimal::from_str("25.5").unwrap());
        amounts.set_percentage_covered(Some(0.8)).unwrap();

        let xml = to_xml_string(&amounts, "claim-totals", &WriteSettings::default()).unwrap();
        assert!(xml.starts_with("<claim-totals><charged-amount>125.5</charged-amount>"));
        let eligible = xml.find("<eligible-for-benefits>").unwrap();
        let percentage = xml.find("<percentage-covered>0.8</percentage-covered>").unwrap();
        let coinsurance = xml.find("<coinsurance>").unwrap();
        assert!(eligible < percentage && percentage < coinsurance);

        let back: ClaimAmounts = from_xml_str(&xml, "claim-totals").unwrap();
        assert_eq!(back, amounts);
        assert_eq!(back.to_string(), "charged 125.5, paid 100, patient owes 25.5");
    }
}
