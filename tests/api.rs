use std::fs;

use preset_catalog::{build_rocket, conf::Conf};
use rocket::{
  http::{ContentType, Status},
  local::blocking::Client,
};
use serde_json::{json, Value};
use tempfile::TempDir;

/// A public directory with an `index.html` and a `presets/` data directory holding two valid
/// records and one corrupt one.
fn setup() -> (TempDir, Client) {
  let public_dir = tempfile::tempdir().unwrap();
  let data_dir = public_dir.path().join("presets");
  fs::create_dir_all(&data_dir).unwrap();
  fs::write(
    public_dir.path().join("index.html"),
    "<html><body>presets</body></html>",
  )
  .unwrap();

  let records = [
    (
      "basic-kit.json",
      json!({
        "name": "Basic Kit",
        "type": "Drumkit",
        "factory": true,
        "samples": [
          { "name": "Kick", "url": "808/kick.wav" },
          { "name": "Snare", "url": "808/snare.wav" }
        ]
      }),
    ),
    (
      "ambient-pad.json",
      json!({
        "name": "Ambient Pad",
        "type": "Synth",
        "samples": [{ "name": "Pad", "url": "pads/ambient.wav" }]
      }),
    ),
  ];
  for (file_name, record) in records {
    fs::write(
      data_dir.join(file_name),
      serde_json::to_string_pretty(&record).unwrap(),
    )
    .unwrap();
  }
  fs::write(data_dir.join("corrupt.json"), "this is not json").unwrap();

  let conf = Conf::new(public_dir.path(), &data_dir);
  let client = Client::tracked(build_rocket(conf)).unwrap();
  (public_dir, client)
}

fn names(body: &Value) -> Vec<&str> {
  body
    .as_array()
    .unwrap()
    .iter()
    .map(|preset| preset["name"].as_str().unwrap())
    .collect()
}

#[test]
fn list_all_skips_corrupt_record() {
  let (_dir, client) = setup();
  let res = client.get("/api/presets").dispatch();
  assert_eq!(res.status(), Status::Ok);
  assert_eq!(res.content_type(), Some(ContentType::JSON));

  let body: Value = res.into_json().unwrap();
  assert_eq!(names(&body), ["Ambient Pad", "Basic Kit"]);
}

#[test]
fn list_with_filters() {
  let (_dir, client) = setup();

  let body: Value = client.get("/api/presets?q=kit").dispatch().into_json().unwrap();
  assert_eq!(names(&body), ["Basic Kit"]);

  let body: Value = client
    .get("/api/presets?type=SYNTH")
    .dispatch()
    .into_json()
    .unwrap();
  assert_eq!(names(&body), ["Ambient Pad"]);

  let body: Value = client
    .get("/api/presets?factory=true")
    .dispatch()
    .into_json()
    .unwrap();
  assert_eq!(names(&body), ["Basic Kit"]);

  let body: Value = client
    .get("/api/presets?q=pad&factory=true&unrelated=1")
    .dispatch()
    .into_json()
    .unwrap();
  assert_eq!(body, json!([]));
}

#[test]
fn get_by_name_or_slug() {
  let (_dir, client) = setup();

  let by_name: Value = client
    .get("/api/presets/Basic%20Kit")
    .dispatch()
    .into_json()
    .unwrap();
  let by_slug: Value = client
    .get("/api/presets/basic-kit")
    .dispatch()
    .into_json()
    .unwrap();
  assert_eq!(by_name, by_slug);
  assert_eq!(by_name["samples"][1]["url"], "808/snare.wav");
}

#[test]
fn get_missing_preset_is_404_with_message() {
  let (_dir, client) = setup();
  let res = client.get("/api/presets/Nonexistent").dispatch();
  assert_eq!(res.status(), Status::NotFound);
  assert_eq!(
    res.into_json::<Value>().unwrap(),
    json!({ "error": "Preset 'Nonexistent' not found" })
  );
}

#[test]
fn get_corrupt_preset_is_opaque_500() {
  let (_dir, client) = setup();
  let res = client.get("/api/presets/corrupt").dispatch();
  assert_eq!(res.status(), Status::InternalServerError);
  assert_eq!(
    res.into_json::<Value>().unwrap(),
    json!({ "error": "Internal Server Error" })
  );
}

#[test]
fn create_replace_delete() {
  let (dir, client) = setup();
  let preset = json!({
    "name": "Lo-Fi Keys",
    "type": "Keys",
    "samples": [{ "name": "C3", "url": "keys/c3.wav" }]
  });

  let res = client.post("/api/presets").json(&preset).dispatch();
  assert_eq!(res.status(), Status::Created);
  assert_eq!(res.headers().get_one("Location"), Some("/api/presets/lo-fi-keys"));
  let written = fs::read_to_string(dir.path().join("presets").join("lo-fi-keys.json")).unwrap();
  assert!(written.contains("\n  \"type\": \"Keys\""), "{}", written);

  let res = client.post("/api/presets").json(&preset).dispatch();
  assert_eq!(res.status(), Status::Conflict);

  let renamed = json!({ "name": "Dusty Keys", "type": "Keys", "factory": false });
  let res = client.put("/api/presets/lo-fi-keys").json(&renamed).dispatch();
  assert_eq!(res.status(), Status::Ok);
  assert_eq!(
    client.get("/api/presets/lo-fi-keys").dispatch().status(),
    Status::NotFound
  );
  let body: Value = client
    .get("/api/presets/Dusty%20Keys")
    .dispatch()
    .into_json()
    .unwrap();
  assert_eq!(body["factory"], json!(false));

  let res = client.delete("/api/presets/dusty-keys").dispatch();
  assert_eq!(res.status(), Status::NoContent);
  assert_eq!(
    client.delete("/api/presets/dusty-keys").dispatch().status(),
    Status::NotFound
  );
}

#[test]
fn invalid_writes_are_rejected() {
  let (_dir, client) = setup();

  let res = client
    .post("/api/presets")
    .json(&json!({ "name": "", "factory": "yes" }))
    .dispatch();
  assert_eq!(res.status(), Status::BadRequest);
  let body: Value = res.into_json().unwrap();
  assert_eq!(body["error"], "Invalid preset");
  assert_eq!(body["details"].as_array().unwrap().len(), 2);

  let res = client
    .post("/api/presets")
    .header(ContentType::JSON)
    .body("{ nope")
    .dispatch();
  assert_eq!(res.status(), Status::BadRequest);
  assert_eq!(res.into_json::<Value>().unwrap(), json!({ "error": "Bad Request" }));

  let res = client
    .put("/api/presets/missing")
    .json(&json!({ "name": "Missing" }))
    .dispatch();
  assert_eq!(res.status(), Status::NotFound);
}

#[test]
fn unknown_api_route_is_json_404() {
  let (_dir, client) = setup();
  let res = client.get("/api/nothing/here").dispatch();
  assert_eq!(res.status(), Status::NotFound);
  assert_eq!(res.into_json::<Value>().unwrap(), json!({ "error": "Not Found" }));
}

#[test]
fn health_and_static_files() {
  let (_dir, client) = setup();

  let body: Value = client.get("/api/health").dispatch().into_json().unwrap();
  assert_eq!(body["ok"], json!(true));
  assert!(body["now"].is_string());

  let res = client.get("/").dispatch();
  assert_eq!(res.status(), Status::Ok);
  assert!(res.into_string().unwrap().contains("presets"));

  // Records are plain files under the public directory too
  let res = client.get("/presets/basic-kit.json").dispatch();
  assert_eq!(res.status(), Status::Ok);
}

#[test]
fn records_with_unexpected_field_types_are_served_as_stored() {
  let (dir, client) = setup();
  let data_dir = dir.path().join("presets");
  fs::write(data_dir.join("b.json"), r#"{ "name": null, "type": "Drumkit" }"#).unwrap();
  fs::write(data_dir.join("c.json"), r#"{ "name": "Pad", "samples": null }"#).unwrap();

  let body: Value = client.get("/api/presets").dispatch().into_json().unwrap();
  assert_eq!(body.as_array().unwrap().len(), 4);
  assert_eq!(body[1], json!({ "name": null, "type": "Drumkit" }));

  let res = client.get("/api/presets/c").dispatch();
  assert_eq!(res.status(), Status::Ok);
  assert_eq!(
    res.into_json::<Value>().unwrap(),
    json!({ "name": "Pad", "samples": null })
  );
}

#[test]
fn repeated_query_key_narrows_instead_of_dropping_filter() {
  let (_dir, client) = setup();
  let body: Value = client
    .get("/api/presets?q=kit&q=pad")
    .dispatch()
    .into_json()
    .unwrap();
  assert_eq!(body, json!([]));
}
