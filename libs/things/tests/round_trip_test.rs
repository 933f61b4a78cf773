//! Round-trip and routing tests over the public API

use chrono::NaiveDate;
use hrecord_binding::{from_xml_str, to_xml_string, FixedClock, WriteSettings};
use hrecord_things::{
    parse_document, parse_thing, AnyThing, CholesterolProfile, Concern, Emotion,
    ExplanationOfBenefits, HeartRate, Height, Mood, Service, Thing, ThingKind, Wellbeing,
};
use hrecord_types::{
    ApproximateDate, Blob, ClaimAmounts, CodableValue, DisplayValue, DurationValue,
    HealthServiceDate, HealthServiceDateTime, Length, Name, Organization, PersonItem,
};
use quickcheck::{QuickCheck, TestResult};

fn clock() -> FixedClock {
    FixedClock(
        NaiveDate::from_ymd_opt(2024, 6, 30)
            .unwrap()
            .and_hms_opt(18, 45, 10)
            .unwrap(),
    )
}

fn samples() -> Vec<AnyThing> {
    let clock = clock();

    let mut emotion = Emotion::new(&clock).unwrap();
    emotion.mood = Mood::Elated;
    emotion.wellbeing = Wellbeing::Vigorous;

    let mut heart_rate = HeartRate::new(&clock, 58).unwrap();
    heart_rate.set_measurement_conditions(Some(CodableValue::new("resting").unwrap()));

    let mut concern = Concern::new(CodableValue::new("Insomnia").unwrap());
    concern.set_status(Some(CodableValue::new("resolved").unwrap()));

    let mut cholesterol = CholesterolProfile::new(&clock).unwrap();
    cholesterol.set_hdl(Some(61)).unwrap();
    cholesterol.set_total_cholesterol(Some(190)).unwrap();

    let length = Length::with_display(1.65, DisplayValue::new(165.0, "cm").unwrap()).unwrap();
    let height = Height::new(&clock, length).unwrap();

    let dates = DurationValue::between(
        ApproximateDate::with_day(2024, 6, 1).unwrap(),
        ApproximateDate::with_day(2024, 6, 2).unwrap(),
    )
    .unwrap();
    let mut service = Service::new(
        CodableValue::new("Office visit").unwrap(),
        dates,
        ClaimAmounts::zero(),
    );
    service.notes_mut().push(String::new());
    service.notes_mut().push("follow-up in 6 weeks".to_string());

    let mut claim = ExplanationOfBenefits::default();
    claim.set_date_submitted(HealthServiceDateTime::new(
        HealthServiceDate::new(2024, 6, 10).unwrap(),
    ));
    claim.set_patient(PersonItem::new(Name::new("Alex Doe").unwrap()));
    claim.set_plan(Organization::new("Contoso Health Plan").unwrap());
    claim.set_member_id("M-100").unwrap();
    claim.set_claim_type(CodableValue::new("Medical").unwrap());
    claim.set_claim_id("C-7").unwrap();
    claim.set_submitted_by(Organization::new("Main Street Clinic").unwrap());
    claim.set_provider(Organization::new("Main Street Clinic").unwrap());
    claim.set_currency(CodableValue::new("USD").unwrap());
    claim.set_claim_totals(ClaimAmounts::zero());
    claim.services_mut().push(service);

    vec![
        AnyThing::Emotion(emotion),
        AnyThing::HeartRate(heart_rate),
        AnyThing::Concern(concern),
        AnyThing::CholesterolProfile(cholesterol),
        AnyThing::Height(height),
        AnyThing::ExplanationOfBenefits(claim),
    ]
}

#[test]
fn every_sample_round_trips_through_the_registry() {
    let settings = WriteSettings::default();
    for thing in samples() {
        let xml = thing.to_xml_with(&settings).unwrap();
        let by_root = parse_document(&xml).unwrap();
        let by_id = parse_thing(thing.kind().type_id(), &xml).unwrap();
        assert_eq!(by_root, thing, "{xml}");
        assert_eq!(by_id, thing, "{xml}");
    }
}

#[test]
fn writing_twice_is_byte_identical() {
    for settings in [WriteSettings::default(), WriteSettings::indented(2)] {
        for thing in samples() {
            let first = thing.to_xml_with(&settings).unwrap();
            let back = parse_document(&first).unwrap();
            assert_eq!(back, thing, "{first}");
            assert_eq!(back.to_xml_with(&settings).unwrap(), first);
        }
    }
}

#[test]
fn empty_texts_survive_indented_output() {
    let settings = WriteSettings::indented(2);
    let blob = Blob::with_bytes("", "text/plain", b"hi".to_vec()).unwrap();
    let xml = to_xml_string(&blob, "blob", &settings).unwrap();
    assert!(xml.contains("<name/>"));

    let back: Blob = from_xml_str(&xml, "blob").unwrap();
    assert_eq!(back.name(), "");
    assert_eq!(back.inline_bytes(), Some(&b"hi"[..]));
    assert_eq!(to_xml_string(&back, "blob", &settings).unwrap(), xml);
}

#[test]
fn indented_output_parses_back() {
    let concern = Concern::new(CodableValue::new("Headache").unwrap());
    let xml = concern.to_xml_with(&WriteSettings::indented(4)).unwrap();
    assert!(xml.contains("\n    <description>"));
    assert_eq!(Concern::from_xml(&xml).unwrap(), concern);
}

#[test]
fn summaries_describe_content() {
    let summaries: Vec<(ThingKind, String)> = samples()
        .iter()
        .map(|thing| (thing.kind(), thing.summary()))
        .collect();
    assert_eq!(
        summaries,
        vec![
            (ThingKind::Emotion, "Mood: Elated, Wellbeing: Vigorous".to_string()),
            (ThingKind::HeartRate, "58 bpm".to_string()),
            (ThingKind::Concern, "Insomnia".to_string()),
            (
                ThingKind::CholesterolProfile,
                "HDL 61, Total 190 mg/dL".to_string()
            ),
            (ThingKind::Height, "165 cm".to_string()),
            (
                ThingKind::ExplanationOfBenefits,
                "Claim C-7 from Main Street Clinic: charged 0, paid 0, patient owes 0".to_string()
            ),
        ]
    );
}

#[test]
fn unset_optional_elements_are_never_written() {
    let heart_rate = HeartRate::new(&clock(), 70).unwrap();
    let xml = heart_rate.to_xml().unwrap();
    assert!(!xml.contains("measurement"));
    assert!(!xml.contains("<tz>"));
}

/// Property: any non-negative heart rate survives a write/parse cycle
#[test]
fn prop_heart_rate_round_trip() {
    fn prop(value: i32) -> TestResult {
        if value < 0 {
            return TestResult::discard();
        }
        let heart_rate = HeartRate::new(&clock(), value).unwrap();
        let xml = heart_rate.to_xml().unwrap();
        TestResult::from_bool(HeartRate::from_xml(&xml).unwrap() == heart_rate)
    }

    QuickCheck::new()
        .tests(100)
        .quickcheck(prop as fn(i32) -> TestResult);
}

/// Property: any ordinal decodes without error
#[test]
fn prop_any_mood_ordinal_decodes() {
    fn prop(ordinal: i32) -> bool {
        let xml = format!(
            "<emotion><when><date><y>2024</y><m>1</m><d>1</d></date></when><mood>{ordinal}</mood></emotion>"
        );
        match Emotion::from_xml(&xml) {
            Ok(emotion) => (1..=5).contains(&ordinal) || emotion.mood == Mood::Unknown,
            Err(_) => false,
        }
    }

    QuickCheck::new()
        .tests(100)
        .quickcheck(prop as fn(i32) -> bool);
}
