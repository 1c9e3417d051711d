//! Wire types for the `Stores-FindNearestStores` response.
//!
//! ## Observed quirks
//!
//! ### `scheduleForJsonLD`
//! Usually a list of opening-hours strings, but some stores send a single
//! string. [`ScheduleForJsonLd`] accepts either and always holds a list;
//! `null` decodes to an empty list. Any other shape fails the whole decode.
//!
//! ### `exceptional`
//! Explicitly `null` for stores without an exceptional schedule. Modelled as
//! `Option<String>`; [`Location::exceptional_schedule`] also treats an empty
//! string as "none".
//!
//! ### Nulls
//! Any field may arrive as `null`. Secondary text fields (`address2`,
//! `phone`, ...) are `Option<String>`; every other scalar, string and list
//! collapses `null` to its default.

use serde::{Deserialize, Deserializer};

/// Top-level response from the store-locator endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StoreResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub radius: i64,
    #[serde(rename = "favStoreId")]
    pub fav_store_id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub locations: Vec<Location>,
    #[serde(deserialize_with = "null_as_default")]
    pub timestamp: String,
    #[serde(rename = "isClickAndCollect", deserialize_with = "null_as_default")]
    pub is_click_and_collect: bool,
}

/// One retail site as reported by the endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Location {
    /// Store identifier, e.g. `"IT001"`. Unique within one response.
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(rename = "omsId")]
    pub oms_id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// City as the endpoint spells it (upper-case in observed responses).
    #[serde(deserialize_with = "null_as_default")]
    pub city: String,
    pub url: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub postal: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub address1: String,
    pub address2: Option<String>,
    pub address3: Option<String>,
    pub phone: Option<String>,
    pub working_status: Option<WorkingStatus>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub favorite: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub schedule: Vec<Schedule>,
    #[serde(rename = "scheduleForJsonLD")]
    pub schedule_for_json_ld: ScheduleForJsonLd,
    pub image: Option<String>,
    pub distance: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub store_services: Vec<StoreService>,
    pub exceptional: Option<String>,
    #[serde(rename = "exceptionalOpeningText")]
    pub exceptional_opening_text: Option<String>,
    #[serde(rename = "exceptionalClosingText")]
    pub exceptional_closing_text: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub has_bookable: bool,
    pub attention_message: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub activation: bool,
    #[serde(rename = "bookingAPIKey")]
    pub booking_api_key: Option<String>,
    #[serde(rename = "enableDeliveryToStore", deserialize_with = "null_as_default")]
    pub enable_delivery_to_store: bool,
    #[serde(rename = "enableClickCollect", deserialize_with = "null_as_default")]
    pub enable_click_collect: bool,
    /// `true` when the watched product can be collected at this store.
    #[serde(deserialize_with = "null_as_default")]
    pub product_availability: bool,
}

impl Location {
    /// Exceptional schedule text, `None` when the field is null or blank.
    #[must_use]
    pub fn exceptional_schedule(&self) -> Option<&str> {
        self.exceptional
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WorkingStatus {
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Schedule {
    #[serde(rename = "Day", deserialize_with = "null_as_default")]
    pub day: String,
    #[serde(rename = "Time", deserialize_with = "null_as_default")]
    pub time: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StoreService {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

/// Opening hours in JSON-LD form, normalised to a list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleForJsonLd(pub Vec<String>);

impl<'de> Deserialize<'de> for ScheduleForJsonLd {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Shape {
            One(String),
            Many(Vec<String>),
        }

        Ok(match Option::<Shape>::deserialize(deserializer)? {
            Some(Shape::One(entry)) => Self(vec![entry]),
            Some(Shape::Many(entries)) => Self(entries),
            None => Self::default(),
        })
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn location_with_schedule(schedule: &serde_json::Value) -> serde_json::Value {
        json!({
            "id": "IT001",
            "name": "SEPHORA MILANO",
            "city": "MILANO",
            "address1": "Corso Vittorio Emanuele II",
            "scheduleForJsonLD": schedule,
            "product_availability": true
        })
    }

    #[test]
    fn schedule_for_json_ld_accepts_single_string() {
        let loc: Location =
            serde_json::from_value(location_with_schedule(&json!("Mo-Sa 10:00-20:00"))).unwrap();
        assert_eq!(loc.schedule_for_json_ld.0, vec!["Mo-Sa 10:00-20:00"]);
    }

    #[test]
    fn schedule_for_json_ld_accepts_list() {
        let loc: Location = serde_json::from_value(location_with_schedule(&json!([
            "Mo-Fr 10:00-20:00",
            "Sa 10:00-21:00"
        ])))
        .unwrap();
        assert_eq!(
            loc.schedule_for_json_ld.0,
            vec!["Mo-Fr 10:00-20:00", "Sa 10:00-21:00"]
        );
    }

    #[test]
    fn schedule_for_json_ld_null_and_missing_are_empty() {
        let loc: Location =
            serde_json::from_value(location_with_schedule(&serde_json::Value::Null)).unwrap();
        assert!(loc.schedule_for_json_ld.0.is_empty());

        let loc: Location = serde_json::from_value(json!({"id": "IT002"})).unwrap();
        assert!(loc.schedule_for_json_ld.0.is_empty());
    }

    #[test]
    fn schedule_for_json_ld_rejects_other_shapes() {
        let result = serde_json::from_value::<Location>(location_with_schedule(&json!(42)));
        assert!(result.is_err(), "numeric schedule should fail decode");
    }

    #[test]
    fn exceptional_null_means_no_exceptional_schedule() {
        let loc: Location = serde_json::from_value(json!({
            "id": "IT001",
            "exceptional": null
        }))
        .unwrap();
        assert!(loc.exceptional.is_none());
        assert!(loc.exceptional_schedule().is_none());

        let loc: Location = serde_json::from_value(json!({
            "id": "IT001",
            "exceptional": "Chiuso il 25/12"
        }))
        .unwrap();
        assert_eq!(loc.exceptional_schedule(), Some("Chiuso il 25/12"));
    }

    #[test]
    fn null_text_fields_decode() {
        let loc: Location = serde_json::from_value(json!({
            "id": "FR123",
            "name": null,
            "address1": null,
            "address2": null,
            "phone": null,
            "working_status": null,
            "schedule": null,
            "store_services": null
        }))
        .unwrap();
        assert_eq!(loc.name, "");
        assert_eq!(loc.address1, "");
        assert!(loc.address2.is_none());
        assert!(loc.schedule.is_empty());
    }

    #[test]
    fn full_response_envelope_decodes() {
        let body = json!({
            "success": true,
            "radius": 15000,
            "favStoreId": null,
            "timestamp": "2024-10-01T10:00:00.000Z",
            "isClickAndCollect": true,
            "locations": [{
                "id": "IT001",
                "omsId": "0001",
                "name": "SEPHORA MILANO DUOMO",
                "city": "MILANO",
                "country": "Italia",
                "country_code": "IT",
                "postal": "20121",
                "address1": "Piazza del Duomo 1",
                "working_status": {"status": "open", "message": "Aperto"},
                "latitude": 45.464,
                "longitude": 9.19,
                "favorite": false,
                "schedule": [{"Day": "Lunedì", "Time": "10:00 - 20:00"}],
                "scheduleForJsonLD": "Mo-Su 10:00-20:00",
                "distance": 880.5,
                "store_services": [{"id": "cc", "name": "Click & Collect"}],
                "exceptional": null,
                "has_bookable": true,
                "enableClickCollect": true,
                "product_availability": false
            }]
        });
        let resp: StoreResponse = serde_json::from_value(body).unwrap();
        assert!(resp.success);
        assert_eq!(resp.radius, 15000);
        assert!(resp.fav_store_id.is_none());
        assert_eq!(resp.locations.len(), 1);
        let loc = &resp.locations[0];
        assert_eq!(loc.oms_id.as_deref(), Some("0001"));
        assert_eq!(loc.schedule[0].day, "Lunedì");
        assert_eq!(loc.store_services[0].name, "Click & Collect");
        assert!(loc.enable_click_collect);
        assert!(!loc.product_availability);
    }

    #[test]
    fn null_scalars_and_nested_strings_decode_as_defaults() {
        let loc: Location = serde_json::from_value(json!({
            "id": null,
            "name": "SEPHORA ROMA",
            "has_bookable": null,
            "favorite": null,
            "activation": null,
            "enableDeliveryToStore": null,
            "enableClickCollect": null,
            "product_availability": null,
            "working_status": {"status": null, "message": null},
            "schedule": [{"Day": null, "Time": "10:00 - 20:00"}],
            "store_services": [{"id": null, "name": null}]
        }))
        .unwrap();
        assert_eq!(loc.id, "");
        assert!(!loc.has_bookable);
        assert!(!loc.product_availability);
        assert_eq!(loc.working_status.unwrap().status, "");
        assert_eq!(loc.schedule[0].day, "");
        assert_eq!(loc.store_services[0].id, "");
    }

    #[test]
    fn null_envelope_fields_keep_the_snapshot() {
        let resp: StoreResponse = serde_json::from_value(json!({
            "success": null,
            "radius": null,
            "isClickAndCollect": null,
            "locations": [
                {"id": "IT001", "has_bookable": null, "product_availability": true},
                {"id": "IT002", "product_availability": false}
            ]
        }))
        .unwrap();
        assert!(!resp.success);
        assert_eq!(resp.radius, 0);
        assert_eq!(resp.locations.len(), 2);
        assert!(resp.locations[0].product_availability);
    }
}
