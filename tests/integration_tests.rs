use chrono::{NaiveDate, NaiveDateTime};
use num_bigint::BigInt;
use serde::Serialize;
use serde_typst::{
    to_string, to_string_with_options, to_value, to_writer, value_to_string, Error, Kind, Number,
    TypstOptions, Value,
};

#[derive(Serialize)]
struct AlternativeItem {
    prefix: String,
    name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Item {
    count: u32,
    name: String,
    alternative_items: Option<Vec<AlternativeItem>>,
    message: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LineItemSection {
    is_secondary: bool,
    title: String,
    items: Vec<Item>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct KitchenSlip {
    #[serde(serialize_with = "serde_typst::calendar::serialize")]
    created_at: NaiveDateTime,
    delivery_address: Option<String>,
    #[serde(serialize_with = "serde_typst::calendar::serialize_option")]
    delivery_time: Option<NaiveDateTime>,
    #[serde(serialize_with = "serde_typst::calendar::serialize")]
    estimated_delivery_time: NaiveDateTime,
    is_copy: bool,
    line_item_sections: Vec<LineItemSection>,
    message: Option<String>,
    #[serde(serialize_with = "serde_typst::calendar::serialize")]
    now: NaiveDateTime,
    order_number: String,
    order_type: String,
    phone_number: String,
    printer_name: String,
    rider_pickup_time: Option<String>,
    table_name: String,
    tip_percentage: u32,
    transaction_channel: String,
}

fn at(ymd: (i32, u32, u32), hms: (u32, u32, u32), milli: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2)
        .unwrap()
        .and_hms_milli_opt(hms.0, hms.1, hms.2, milli)
        .unwrap()
}

fn item(count: u32, name: &str, alternatives: Option<Vec<(&str, &str)>>, message: Option<&str>) -> Item {
    Item {
        count,
        name: name.to_string(),
        alternative_items: alternatives.map(|alts| {
            alts.into_iter()
                .map(|(prefix, name)| AlternativeItem {
                    prefix: prefix.to_string(),
                    name: name.to_string(),
                })
                .collect()
        }),
        message: message.map(str::to_string),
    }
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

#[test]
fn test_kitchen_slip() {
    let slip = KitchenSlip {
        created_at: at((2025, 5, 15), (10, 21, 25), 648),
        delivery_address: None,
        delivery_time: None,
        estimated_delivery_time: at((2025, 5, 15), (10, 51, 25), 655),
        is_copy: false,
        line_item_sections: vec![LineItemSection {
            is_secondary: false,
            title: String::new(),
            items: vec![
                item(1, "Al tonno", None, Some("Utan tonfisk tack!")),
                item(1, "Capricciosa", None, None),
                item(13, "Kebabpizza", None, None),
                item(3, "Vesuvio", Some(vec![("−", "Vanlig"), ("•", "Glutenfri")]), None),
                item(
                    1,
                    "Calzone (inbakad)",
                    Some(vec![("3", "Skinka")]),
                    Some("Mycket skinka!! 😁"),
                ),
            ],
        }],
        message: None,
        now: at((2025, 5, 15), (10, 21, 26), 344),
        order_number: "308".to_string(),
        order_type: "TakeAway".to_string(),
        phone_number: "070-123 45 67".to_string(),
        printer_name: "Varmkök".to_string(),
        rider_pickup_time: None,
        table_name: "Avhämtning".to_string(),
        tip_percentage: 10,
        transaction_channel: "Web".to_string(),
    };

    let expected = r#"
        (
          "createdAt": datetime(year: 2025, month: 5, day: 15, hour: 10, minute: 21, second: 25),
          "deliveryAddress": none,
          "deliveryTime": none,
          "estimatedDeliveryTime": datetime(year: 2025, month: 5, day: 15, hour: 10, minute: 51, second: 25),
          "isCopy": false,
          "lineItemSections": (
            (
              "isSecondary": false,
              "title": "",
              "items": (
                ("count": 1, "name": "Al tonno", "alternativeItems": none, "message": "Utan tonfisk tack!"),
                ("count": 1, "name": "Capricciosa", "alternativeItems": none, "message": none),
                ("count": 13, "name": "Kebabpizza", "alternativeItems": none, "message": none),
                (
                  "count": 3,
                  "name": "Vesuvio",
                  "alternativeItems": (
                    ("prefix": "−", "name": "Vanlig"),
                    ("prefix": "•", "name": "Glutenfri")
                  ),
                  "message": none
                ),
                (
                  "count": 1,
                  "name": "Calzone (inbakad)",
                  "alternativeItems": (("prefix": "3", "name": "Skinka"),),
                  "message": "Mycket skinka!! 😁"
                )
              )
            ),
          ),
          "message": none,
          "now": datetime(year: 2025, month: 5, day: 15, hour: 10, minute: 21, second: 26),
          "orderNumber": "308",
          "orderType": "TakeAway",
          "phoneNumber": "070-123 45 67",
          "printerName": "Varmkök",
          "riderPickupTime": none,
          "tableName": "Avhämtning",
          "tipPercentage": 10,
          "transactionChannel": "Web"
        )
    "#;

    let typst = to_string(&slip).unwrap();
    // Strings in this document contain spaces, so compare with all whitespace removed
    assert_eq!(strip_whitespace(&typst), strip_whitespace(expected));
    assert!(typst.contains(r#""phoneNumber":"070-123 45 67""#));
}

#[test]
fn test_json_input() {
    let json: serde_json::Value = serde_json::from_str(
        r#"{"b": [1], "a": {}, "c": [], "big": 45123456789, "f": 1.5, "s": "x\ny", "n": null}"#,
    )
    .unwrap();

    assert_eq!(
        to_string(&json).unwrap(),
        r#"("b":(1,),"a":(:),"c":(),"big":45123456789,"f":1.5,"s":"x\ny","n":none)"#
    );
}

#[test]
fn test_big_integers_are_exact() {
    assert_eq!(to_string(&45_123_456_789i64).unwrap(), "45123456789");
    assert_eq!(to_string(&u64::MAX).unwrap(), "18446744073709551615");
    assert_eq!(
        to_string(&i128::MIN).unwrap(),
        "-170141183460469231731687303715884105728"
    );

    #[derive(Serialize)]
    struct Account {
        #[serde(serialize_with = "serde_typst::bigint::serialize")]
        balance: BigInt,
    }

    let account = Account {
        balance: "123456789012345678901234567890".parse().unwrap(),
    };
    assert_eq!(
        to_string(&account).unwrap(),
        r#"("balance":123456789012345678901234567890)"#
    );
}

#[test]
fn test_empty_record_forms() {
    #[derive(Serialize)]
    struct Empty {}

    #[derive(Serialize)]
    struct AllSkipped {
        #[serde(skip_serializing_if = "Option::is_none")]
        a: Option<u8>,
        #[serde(skip_serializing_if = "Option::is_none")]
        b: Option<u8>,
    }

    assert_eq!(to_string(&Empty {}).unwrap(), "(:)");
    assert_eq!(to_string(&AllSkipped { a: None, b: None }).unwrap(), "()");
    assert_eq!(
        to_string(&AllSkipped {
            a: None,
            b: Some(2)
        })
        .unwrap(),
        r#"("b":2)"#
    );
}

#[test]
fn test_skip_none_fields_option() {
    #[derive(Serialize)]
    struct Contact {
        name: String,
        phone: Option<String>,
        tags: Vec<Option<String>>,
    }

    let contact = Contact {
        name: "Ada".to_string(),
        phone: None,
        tags: vec![None],
    };

    assert_eq!(
        to_string(&contact).unwrap(),
        r#"("name":"Ada","phone":none,"tags":(none,))"#
    );

    let options = TypstOptions::new().with_skip_none_fields(true);
    assert_eq!(
        to_string_with_options(&contact, options).unwrap(),
        r#"("name":"Ada","tags":(none,))"#
    );
}

#[test]
fn test_unsupported_value_aborts() {
    struct Bytes(Vec<u8>);

    impl Serialize for Bytes {
        fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            s.serialize_bytes(&self.0)
        }
    }

    #[derive(Serialize)]
    struct Attachment {
        name: String,
        data: Bytes,
    }

    let attachment = Attachment {
        name: "logo.png".to_string(),
        data: Bytes(vec![0x89, 0x50, 0x4e, 0x47]),
    };
    let err = to_string(&vec![attachment]).unwrap_err();
    match err {
        Error::UnsupportedValue(ref value) => assert_eq!(value.kind(), Kind::Unsupported),
        other => panic!("expected unsupported value, got {other:?}"),
    }
}

#[test]
fn test_to_value_shapes() {
    #[derive(Serialize)]
    struct User {
        id: u32,
        name: String,
        tags: Vec<String>,
    }

    let value = to_value(&User {
        id: 123,
        name: "Alice".to_string(),
        tags: vec!["admin".to_string()],
    })
    .unwrap();

    let record = value.as_record().expect("Expected record");
    assert_eq!(record.get("id"), Some(&Value::Number(Number::Integer(123))));
    assert_eq!(record.get("name"), Some(&Value::String("Alice".to_string())));
    assert_eq!(
        record.get("tags"),
        Some(&Value::Array(vec![Value::from("admin")]))
    );
    assert_eq!(value_to_string(&value).unwrap(), r#"("id":123,"name":"Alice","tags":("admin",))"#);
}

#[test]
fn test_calendar_values() {
    let date = NaiveDate::from_ymd_opt(2023, 10, 1).unwrap();
    let time = chrono::NaiveTime::from_hms_opt(12, 34, 56).unwrap();

    assert_eq!(
        value_to_string(&Value::from_calendar(&date)).unwrap(),
        "datetime(year:2023,month:10,day:1)"
    );
    assert_eq!(
        value_to_string(&Value::from_calendar(&date.and_time(time))).unwrap(),
        "datetime(year:2023,month:10,day:1,hour:12,minute:34,second:56)"
    );
    assert_eq!(
        value_to_string(&Value::from(time)).unwrap(),
        "datetime(hour:12,minute:34,second:56)"
    );

    // Plain chrono serialization is a string, not a datetime
    assert_eq!(to_string(&date).unwrap(), r#""2023-10-01""#);
}

#[test]
fn test_to_writer() {
    let mut buffer = Vec::new();
    to_writer(&mut buffer, &vec!["a", "b"]).unwrap();
    assert_eq!(String::from_utf8(buffer).unwrap(), r#"("a","b")"#);
}
