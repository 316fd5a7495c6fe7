use recall_core::{InvalidRangeError, PassageRange, SectionCatalog, MAX_SECTION_ID};

#[test]
fn validate_accepts_span_within_section() {
    let range = PassageRange::validate(2, 1, 5, 286).unwrap();

    assert_eq!(range.section_id(), 2);
    assert_eq!(range.start_unit(), 1);
    assert_eq!(range.end_unit(), 5);
    assert_eq!(range.unit_count(), 5);
}

#[test]
fn validate_rejects_reversed_units() {
    let err = PassageRange::validate(2, 5, 3, 286).unwrap_err();
    assert_eq!(
        err,
        InvalidRangeError::StartAfterEnd {
            start_unit: 5,
            end_unit: 3,
        }
    );
}

#[test]
fn validate_rejects_end_beyond_section_length() {
    let err = PassageRange::validate(1, 1, 8, 7).unwrap_err();
    assert_eq!(
        err,
        InvalidRangeError::EndBeyondSection {
            section_id: 1,
            end_unit: 8,
            unit_count: 7,
        }
    );
}

#[test]
fn validate_rejects_zero_start_and_out_of_bounds_sections() {
    assert_eq!(
        PassageRange::validate(1, 0, 3, 7).unwrap_err(),
        InvalidRangeError::StartBelowOne
    );
    assert!(matches!(
        PassageRange::validate(0, 1, 1, 7).unwrap_err(),
        InvalidRangeError::SectionOutOfBounds { section_id: 0, .. }
    ));
    assert!(matches!(
        PassageRange::validate(MAX_SECTION_ID + 1, 1, 1, 7).unwrap_err(),
        InvalidRangeError::SectionOutOfBounds { .. }
    ));
}

#[test]
fn standard_catalog_validates_against_known_lengths() {
    let catalog = SectionCatalog::standard();

    assert!(catalog.validate_range(2, 255, 257).is_ok());
    assert!(matches!(
        catalog.validate_range(2, 280, 287).unwrap_err(),
        InvalidRangeError::EndBeyondSection { unit_count: 286, .. }
    ));
    assert!(matches!(
        catalog.validate_range(115, 1, 1).unwrap_err(),
        InvalidRangeError::SectionOutOfBounds { .. }
    ));
}

#[test]
fn range_serializes_with_camel_case_fields() {
    let range = PassageRange::validate(36, 1, 12, 83).unwrap();

    let json = serde_json::to_value(range).unwrap();
    assert_eq!(json["sectionId"], 36);
    assert_eq!(json["startUnit"], 1);
    assert_eq!(json["endUnit"], 12);
}
