//! End-to-end checks of the record-to-document pipeline, going through the
//! serialized JSON the automation controller would actually consume.

use std::collections::BTreeMap;

use serde_json::json;

use rollcall_core::{
    AttributeValue, HostFilter, HostLookup, InventoryBuilder, InventoryError, ManagedRoleBuilder,
    RawRecord,
};

fn extattrs(value: serde_json::Value) -> BTreeMap<String, AttributeValue> {
    serde_json::from_value(value).unwrap()
}

#[test]
fn full_document_for_a_grouped_record() {
    let records = vec![RawRecord {
        identifier: Some("10.0.0.5".to_string()),
        group_key: Some("prod".to_string()),
        extattrs: extattrs(json!({"ansible_user": {"value": "deploy"}})),
        ..RawRecord::default()
    }];

    let built = InventoryBuilder::default().build(&records, &HostFilter::All);
    let doc = serde_json::to_value(&built.document).unwrap();

    assert_eq!(doc["prod"]["hosts"], json!(["10.0.0.5"]));
    assert_eq!(
        doc["_meta"]["hostvars"]["10.0.0.5"],
        json!({"view": "prod", "ansible_user": "deploy"})
    );
}

#[test]
fn unprefixed_attribute_stays_nested() {
    let records = vec![RawRecord {
        identifier: Some("ns1.example.net".to_string()),
        extattrs: extattrs(json!({"owner": {"value": "net-team"}})),
        ..RawRecord::default()
    }];

    let built = InventoryBuilder::default().build(&records, &HostFilter::All);
    let doc = serde_json::to_value(&built.document).unwrap();

    let vars = &doc["_meta"]["hostvars"]["ns1.example.net"];
    assert_eq!(vars["extattrs"]["owner"], json!("net-team"));
    assert!(vars.get("owner").is_none());
}

#[test]
fn single_host_query_not_found_is_explicit() {
    let records = vec![RawRecord {
        identifier: Some("10.0.0.1".to_string()),
        group_key: Some("prod".to_string()),
        ..RawRecord::default()
    }];

    let built = InventoryBuilder::default().build(&records, &HostFilter::All);

    assert!(built.document.host_vars("10.0.0.1").is_ok());
    assert_eq!(
        built.document.host_vars("10.9.9.9"),
        Err(InventoryError::UnknownHost("10.9.9.9".to_string()))
    );
}

#[test]
fn managed_router_appears_under_all_and_its_role_group() {
    let records = vec![RawRecord {
        identifier: Some("192.0.2.1".to_string()),
        display_name: Some("edge01".to_string()),
        extattrs: extattrs(json!({"custom_managed": "Yes", "custom_role": "router"})),
        ..RawRecord::default()
    }];

    let built = ManagedRoleBuilder::default().build(&records, &HostFilter::All);
    let doc = serde_json::to_value(&built.document).unwrap();

    assert_eq!(
        doc["all"]["hosts"]["edge01"],
        json!({"ansible_host": "192.0.2.1"})
    );
    assert_eq!(
        doc["all"]["children"]["router"]["hosts"]["edge01"],
        json!({"ansible_host": "192.0.2.1"})
    );
    assert_eq!(
        built.document.lookup("edge01").map(|v| v["ansible_host"].clone()),
        Some(json!("192.0.2.1"))
    );
}

#[test]
fn repeated_builds_serialize_identically() {
    let records = vec![
        RawRecord {
            identifier: Some("10.0.0.1".to_string()),
            group_key: Some("internal".to_string()),
            extattrs: extattrs(json!({"Site": {"value": "hq"}, "ansible_port": {"value": 22}})),
            ..RawRecord::default()
        },
        RawRecord {
            identifier: Some("10.0.0.2".to_string()),
            group_key: Some("dmz".to_string()),
            ..RawRecord::default()
        },
    ];

    let builder = InventoryBuilder::default();
    let first = serde_json::to_string(&builder.build(&records, &HostFilter::All).document).unwrap();
    let second = serde_json::to_string(&builder.build(&records, &HostFilter::All).document).unwrap();

    assert_eq!(first, second);
}

#[test]
fn one_bad_record_does_not_poison_the_batch() {
    let mut records: Vec<RawRecord> = (1..=5)
        .map(|i| RawRecord {
            identifier: Some(format!("10.0.0.{i}")),
            group_key: Some("lab".to_string()),
            ..RawRecord::default()
        })
        .collect();
    records.insert(2, RawRecord::default());

    let built = InventoryBuilder::default().build(&records, &HostFilter::All);

    assert_eq!(built.skipped, 1);
    assert_eq!(built.document.meta.hostvars.len(), 5);
    assert_eq!(built.document.groups["lab"].hosts.len(), 5);
}
