#![cfg(test)]
use drone_common::repository::ImportOptions;
use drone_core::import::ImportService;
use drone_protocols::nikto;
use serde_json::{Value, json};

use crate::utils::{MemoryLair, NIKTO_XML, PROJECT_ID, PROJECT_JSON};

fn find_host<'a>(project: &'a Value, ip: &str) -> &'a Value {
    project["hosts"]
        .as_array()
        .and_then(|hosts| hosts.iter().find(|host| host["ipv4"] == ip))
        .expect("host missing from imported project")
}

fn find_service<'a>(host: &'a Value, port: u64) -> &'a Value {
    host["services"]
        .as_array()
        .and_then(|services| services.iter().find(|service| service["port"] == port))
        .expect("service missing from imported project")
}

/// Full flow: nikto XML in, merged Lair JSON out.
#[tokio::test]
async fn import_report_into_project() {
    let lair = MemoryLair::with_project(PROJECT_JSON);
    let service = ImportService::new(Box::new(lair.clone()));
    let report = nikto::parse(NIKTO_XML).unwrap();
    let options = ImportOptions { force_ports: true };

    let unmatched = service
        .import(PROJECT_ID, &report, &["external".to_string()], options)
        .await
        .unwrap();

    assert_eq!(
        unmatched.into_iter().collect::<Vec<_>>(),
        vec!["10.0.0.6 (10.0.0.6:8080)"]
    );

    let (project, used_options) = lair.last_import().expect("nothing was imported");
    assert_eq!(used_options, options);
    assert_eq!(project["tool"], "nikto");
    assert_eq!(
        project["commands"],
        json!([{ "tool": "nikto", "command": "-h 10.0.0.5 -p 443 -ssl" }])
    );

    let web = find_host(&project, "10.0.0.5");
    assert_eq!(
        web["hostnames"],
        json!(["www.example.com", "example.com", "https://secure.example.com"])
    );
    assert_eq!(web["tags"], json!(["external", "external"]));
    assert_eq!(web["lastModifiedBy"], "nikto");

    let http = find_service(web, 80);
    assert_eq!(http["lastModifiedBy"], "nikto");
    assert_eq!(
        http["notes"],
        json!([{
            "title": "nikto v2.1.5 (example.com:80)",
            "content": "Outdated header URI: /\n\
                        /admin/: This might be interesting... URI: /admin/ OSVDBID: 3092\n\
                        \nStart: Fri Mar 13 11:05:08 2015 End: Fri Mar 13 11:09:41 2015",
            "lastModifiedBy": "nikto"
        }])
    );

    let https = find_service(web, 443);
    let note = &https["notes"][0];
    assert_eq!(note["title"], "nikto v2.1.5 (secure.example.com:443)");
    assert_eq!(
        note["content"],
        "SSL Information:\n\
         Subject: /CN=secure.example.com\n\
         Ciphers: ECDHE-RSA-AES256-GCM-SHA384\n\
         Issuer: /CN=Example CA\n\n\
         The anti-clickjacking X-Frame-Options header is not present. URI: /\n\
         \nStart: Fri Mar 13 12:00:00 2015 End: Fri Mar 13 12:03:10 2015"
    );
}

#[tokio::test]
async fn untouched_data_survives_the_round_trip() {
    let lair = MemoryLair::with_project(PROJECT_JSON);
    let service = ImportService::new(Box::new(lair.clone()));
    let report = nikto::parse(NIKTO_XML).unwrap();

    service
        .import(PROJECT_ID, &report, &[], ImportOptions::default())
        .await
        .unwrap();

    let (project, _) = lair.last_import().unwrap();
    assert_eq!(project["name"], "acme-external");
    assert_eq!(project["issues"], Value::Null);

    let web = find_host(&project, "10.0.0.5");
    assert_eq!(web["_id"], "h-5");
    assert_eq!(web["os"]["fingerprint"], "Linux 3.x");
    assert_eq!(find_service(web, 80)["product"], "Apache");

    let ssh_host = find_host(&project, "10.0.0.7");
    assert_eq!(ssh_host["tags"], json!(["dmz"]));
    assert_eq!(ssh_host["lastModifiedBy"], "nmap");
    assert_eq!(find_service(ssh_host, 22)["notes"], json!([]));
}

#[tokio::test]
async fn second_import_appends_again() {
    let lair = MemoryLair::with_project(PROJECT_JSON);
    let service = ImportService::new(Box::new(lair.clone()));
    let report = nikto::parse(NIKTO_XML).unwrap();
    let tags = vec!["external".to_string()];

    for _ in 0..2 {
        service
            .import(PROJECT_ID, &report, &tags, ImportOptions::default())
            .await
            .unwrap();
    }

    let (project, _) = lair.last_import().unwrap();
    let web = find_host(&project, "10.0.0.5");
    assert_eq!(find_service(web, 80)["notes"].as_array().map(Vec::len), Some(2));
    assert_eq!(web["tags"].as_array().map(Vec::len), Some(4));
    assert_eq!(web["hostnames"].as_array().map(Vec::len), Some(3));
    assert_eq!(project["commands"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn unknown_project_is_not_imported() {
    let lair = MemoryLair::with_project(PROJECT_JSON);
    let service = ImportService::new(Box::new(lair.clone()));
    let report = nikto::parse(NIKTO_XML).unwrap();

    let result = service
        .import("does-not-exist", &report, &[], ImportOptions::default())
        .await;

    assert!(result.is_err());
    assert!(lair.last_import().is_none());
}
