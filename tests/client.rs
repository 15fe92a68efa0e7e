use monnit::{ErrorKind, RawResponse, Result, SensorClient, SensorId, Transport};
use std::cell::Cell;
use std::collections::HashMap;

const BASE: &str = "https://www.imonnit.com/json";

// Serves fixed bodies by URL, 404 for anything else
#[derive(Default)]
struct FakeApi {
    routes: HashMap<String, RawResponse>,
    hits: Cell<usize>,
}

impl FakeApi {
    fn route(mut self, path: &str, status: u16, body: &str) -> Self {
        self.routes
            .insert(format!("{BASE}{path}"), RawResponse::new(status, body));
        self
    }
}

impl Transport for FakeApi {
    fn get(&self, url: &str) -> Result<RawResponse> {
        self.hits.set(self.hits.get() + 1);
        Ok(self
            .routes
            .get(url)
            .cloned()
            .unwrap_or_else(|| RawResponse::new(404, "")))
    }
}

fn fake_api() -> FakeApi {
    FakeApi::default()
        .route(
            "/SensorList/good",
            200,
            r#"{"Result":[
                {"SensorID":1,"SensorName":"Office","CurrentReading":"70.0"},
                {"SensorID":2,"SensorName":"Lab","CurrentReading":"80.0"},
                {"SensorID":3,"SensorName":"Door","CurrentReading":"Closed"}
            ]}"#,
        )
        .route(
            "/SensorList/good?applicationID=2",
            200,
            r#"{"Result":[
                {"SensorID":1,"CurrentReading":"70.0"},
                {"SensorID":2,"CurrentReading":"80.0"}
            ]}"#,
        )
        .route(
            "/SensorGet/good?sensorID=2",
            200,
            r#"{"Result":[{"SensorID":2,"CurrentReading":"80.0"}]}"#,
        )
        .route(
            "/SensorGet/good?sensorID=404404",
            200,
            r#"{"Result":"Invalid SensorID"}"#,
        )
        .route(
            "/SensorList/bad",
            200,
            r#"{"Result":"Invalid Authorization Token"}"#,
        )
        .route("/SensorList/down", 503, "Service Unavailable")
}

#[test]
fn list_then_average() {
    let api = fake_api();
    let mut client = SensorClient::with_transport(Some("good"), &api);
    client
        .read_all_sensors(Some(&SensorId::from(2)))
        .unwrap();
    let ids: Vec<String> = client
        .data()
        .unwrap()
        .iter()
        .map(|r| r.sensor_id.to_string())
        .collect();
    assert_eq!(ids, ["1", "2"]);
    assert_eq!(client.average_temps(None).unwrap(), 75.0);
    assert_eq!(
        client.average_temps(Some(&[SensorId::from("2")][..])).unwrap(),
        80.0
    );
}

#[test]
fn full_list_keeps_order_and_fields() {
    let api = fake_api();
    let mut client = SensorClient::with_transport(Some("good"), &api);
    client.read_all_sensors(None).unwrap();
    let data = client.data().unwrap();
    assert_eq!(data.len(), 3);
    assert_eq!(data.records()[2].extra["SensorName"], "Door");
    // "Closed" reads as zero
    assert_eq!(client.average_temps(None).unwrap(), 50.0);
}

#[test]
fn single_sensor_replaces_list() {
    let api = fake_api();
    let mut client = SensorClient::with_transport(Some("good"), &api);
    client.read_all_sensors(None).unwrap();
    client.read_single_sensor(&SensorId::from(2)).unwrap();
    assert_eq!(client.data().unwrap().len(), 1);
    assert_eq!(client.average_temps(None).unwrap(), 80.0);
}

#[test]
fn soft_errors_leave_data_alone() {
    let api = fake_api();
    let mut client = SensorClient::with_transport(Some("good"), &api);
    client.read_all_sensors(None).unwrap();
    let before = client.data().cloned();

    let e = client
        .read_single_sensor(&SensorId::from(404404))
        .unwrap_err();
    assert_eq!(e.kind(), ErrorKind::NotFound);

    client.set_auth_key("bad");
    let e = client.read_all_sensors(None).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::Authorization);

    client.set_auth_key("down");
    let e = client.read_all_sensors(None).unwrap_err();
    assert!(matches!(e, monnit::Error::HttpStatus(503)));

    assert_eq!(client.data().cloned(), before);
}

#[test]
fn missing_key_hits_the_bare_endpoint() {
    let api = FakeApi::default().route(
        "/SensorList/",
        200,
        r#"{"Result":"Invalid Authorization Token"}"#,
    );
    let mut client = SensorClient::with_transport(None, &api);
    let e = client.read_all_sensors(None).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::Authorization);
    assert!(client.data().is_none());
}

#[test]
fn empty_sensor_id_is_rejected_offline() {
    let api = fake_api();
    let mut client = SensorClient::with_transport(Some("good"), &api);
    let e = client.read_single_sensor(&SensorId::from("")).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::InvalidArgument);
    assert_eq!(api.hits.get(), 0);
}

#[test]
fn average_before_read() {
    let api = fake_api();
    let client = SensorClient::with_transport(Some("good"), &api);
    assert_eq!(
        client.average_temps(None).unwrap_err().kind(),
        ErrorKind::EmptyState
    );
}

#[test]
fn average_without_match() {
    let api = fake_api();
    let mut client = SensorClient::with_transport(Some("good"), &api);
    client.read_all_sensors(None).unwrap();
    let e = client
        .average_temps(Some(&[SensorId::from(99)][..]))
        .unwrap_err();
    assert_eq!(e.kind(), ErrorKind::Arithmetic);
}
