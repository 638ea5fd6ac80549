use super::common::*;
use crate::leads::LeadViolation;
use chrono::NaiveDate;

#[test]
fn accepts_both_kenyan_phone_prefixes() {
    let validator = validator();
    let mut contact = contact();

    for phone in ["0712345678", "0112345678", "+254712345678"] {
        contact.phone = phone.to_string();
        assert_eq!(validator.validate_contact(&contact), Ok(()), "{phone}");
    }

    for phone in ["0812345678", "071234567", "254712345678", "+2547123456789"] {
        contact.phone = phone.to_string();
        assert_eq!(
            validator.validate_contact(&contact),
            Err(LeadViolation::InvalidPhone(phone.to_string()))
        );
    }
}

#[test]
fn rejects_single_character_names_and_bad_emails() {
    let validator = validator();
    let mut contact = contact();
    contact.full_name = " J ".to_string();
    assert_eq!(
        validator.validate_contact(&contact),
        Err(LeadViolation::NameTooShort)
    );

    let mut contact = super::common::contact();
    contact.email = Some("wanjiru@example".to_string());
    let violation = validator
        .validate_contact(&contact)
        .expect_err("email without domain suffix");
    assert_eq!(violation.field(), "email");
}

#[test]
fn booking_must_be_after_today_with_valid_time() {
    let validator = validator();
    let mut booking = booking();
    booking.preferred_date = today();

    assert_eq!(
        validator.validate_test_drive(&booking, today()),
        Err(LeadViolation::BookingDateNotInFuture { date: today() })
    );

    booking.preferred_date = NaiveDate::from_ymd_opt(2026, 10, 15).expect("valid");
    booking.preferred_time = "24:00".to_string();
    assert_eq!(
        validator.validate_test_drive(&booking, today()),
        Err(LeadViolation::InvalidTime("24:00".to_string()))
    );

    booking.preferred_time = "9:05".to_string();
    assert_eq!(validator.validate_test_drive(&booking, today()), Ok(()));
}

#[test]
fn trade_in_year_is_bounded() {
    let validator = validator();
    let mut request = trade_in();
    request.year = 2028;

    match validator.validate_trade_in(&request, 2026) {
        Err(LeadViolation::YearOutOfRange { latest, .. }) => assert_eq!(latest, 2027),
        other => panic!("expected year violation, got {other:?}"),
    }

    request.year = 2015;
    request.expected_price = 0;
    assert_eq!(
        validator.validate_trade_in(&request, 2026),
        Err(LeadViolation::MissingExpectedPrice)
    );
}

#[test]
fn finance_application_enforces_schema_rules() {
    let validator = validator();
    assert_eq!(validator.validate_finance(&finance_application()), Ok(()));

    let mut application = finance_application();
    application.kra_pin = "a012345678z".to_string();
    assert!(matches!(
        validator.validate_finance(&application),
        Err(LeadViolation::InvalidKraPin(_))
    ));

    let mut application = finance_application();
    application.monthly_income = 14_999;
    assert_eq!(
        validator.validate_finance(&application),
        Err(LeadViolation::IncomeBelowMinimum {
            minimum: 15_000,
            found: 14_999
        })
    );

    let mut application = finance_application();
    application.deposit_amount = 40_000;
    assert_eq!(
        validator
            .validate_finance(&application)
            .expect_err("deposit too low")
            .field(),
        "deposit_amount"
    );

    let mut application = finance_application();
    application.repayment_period = 30;
    assert_eq!(
        validator.validate_finance(&application),
        Err(LeadViolation::InvalidRepaymentPeriod(30))
    );

    let mut application = finance_application();
    application.national_id = "12345".to_string();
    assert_eq!(
        validator.validate_finance(&application),
        Err(LeadViolation::NationalIdTooShort)
    );
}

#[test]
fn inquiry_needs_email_and_reasonable_message() {
    let validator = validator();
    assert_eq!(validator.validate_inquiry(&inquiry()), Ok(()));

    let mut short = inquiry();
    short.message = "Hi there".to_string();
    assert_eq!(
        validator.validate_inquiry(&short),
        Err(LeadViolation::MessageLength { length: 8 })
    );

    let mut no_email = inquiry();
    no_email.contact.email = None;
    assert_eq!(
        validator.validate_inquiry(&no_email),
        Err(LeadViolation::MissingEmail)
    );
}
