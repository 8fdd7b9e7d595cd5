//! Dentist record types and validation
//!
//! Validation is an explicit step run before any persistence attempt: the
//! raw request shape (`DentistInput`, every field optional) either becomes a
//! fully-typed `NewDentist` or yields the complete list of missing/invalid
//! fields. The storage layer never sees an unvalidated record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::FieldError;

/// A persisted dentist record as returned by the API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dentist {
    pub id: Uuid,
    pub name: String,
    pub specialty: String,
    pub address: String,
    pub city: String,
    pub phone: String,
    pub rating: f64,
    pub reviews_count: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub opening_hours: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_maps_link: Option<String>,
    pub photo_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Raw create payload, prior to validation
///
/// Every field is optional so that validation can report the full set of
/// problems at once instead of failing on the first missing field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DentistInput {
    pub name: Option<String>,
    pub specialty: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub rating: Option<f64>,
    pub reviews_count: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub opening_hours: Option<String>,
    pub website: Option<String>,
    pub google_maps_link: Option<String>,
    pub photo_url: Option<String>,
}

/// A validated record ready for insertion, with its generated identifier
#[derive(Debug, Clone)]
pub struct NewDentist {
    pub id: Uuid,
    pub name: String,
    pub specialty: String,
    pub address: String,
    pub city: String,
    pub phone: String,
    pub rating: f64,
    pub reviews_count: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub opening_hours: String,
    pub website: Option<String>,
    pub google_maps_link: Option<String>,
    pub photo_url: Option<String>,
}

impl DentistInput {
    /// Validate this payload, producing either an insert-ready record with a
    /// freshly generated identifier or the list of field problems.
    ///
    /// Required: name, specialty, address, city, phone, rating,
    /// reviewsCount, latitude, longitude, openingHours. Rating must fall in
    /// 0..=5 and reviewsCount must be non-negative. Latitude/longitude are
    /// required but not range-checked. website, googleMapsLink and photoUrl
    /// are optional; an absent photoUrl is stored as null.
    pub fn validate(self) -> Result<NewDentist, Vec<FieldError>> {
        let mut errors = Vec::new();

        fn required_string(
            value: Option<String>,
            field: &str,
            errors: &mut Vec<FieldError>,
        ) -> String {
            match value {
                Some(s) if !s.trim().is_empty() => s,
                Some(_) => {
                    errors.push(FieldError::new(field, "must not be empty"));
                    String::new()
                }
                None => {
                    errors.push(FieldError::new(field, "is required"));
                    String::new()
                }
            }
        }

        let name = required_string(self.name, "name", &mut errors);
        let specialty = required_string(self.specialty, "specialty", &mut errors);
        let address = required_string(self.address, "address", &mut errors);
        let city = required_string(self.city, "city", &mut errors);
        let phone = required_string(self.phone, "phone", &mut errors);
        let opening_hours = required_string(self.opening_hours, "openingHours", &mut errors);

        let rating = match self.rating {
            Some(r) if (0.0..=5.0).contains(&r) => r,
            Some(_) => {
                errors.push(FieldError::new("rating", "must be between 0 and 5"));
                0.0
            }
            None => {
                errors.push(FieldError::new("rating", "is required"));
                0.0
            }
        };

        let reviews_count = match self.reviews_count {
            Some(n) if n >= 0 => n,
            Some(_) => {
                errors.push(FieldError::new("reviewsCount", "must not be negative"));
                0
            }
            None => {
                errors.push(FieldError::new("reviewsCount", "is required"));
                0
            }
        };

        let latitude = match self.latitude {
            Some(v) => v,
            None => {
                errors.push(FieldError::new("latitude", "is required"));
                0.0
            }
        };

        let longitude = match self.longitude {
            Some(v) => v,
            None => {
                errors.push(FieldError::new("longitude", "is required"));
                0.0
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewDentist {
            id: Uuid::new_v4(),
            name,
            specialty,
            address,
            city,
            phone,
            rating,
            reviews_count,
            latitude,
            longitude,
            opening_hours,
            website: self.website,
            google_maps_link: self.google_maps_link,
            photo_url: self.photo_url,
        })
    }
}

/// Partial update payload for PUT; omitted fields retain their prior values
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DentistUpdate {
    pub name: Option<String>,
    pub specialty: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub rating: Option<f64>,
    pub reviews_count: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub opening_hours: Option<String>,
    pub website: Option<String>,
    pub google_maps_link: Option<String>,
    pub photo_url: Option<String>,
}

impl DentistUpdate {
    /// Merge supplied fields onto an existing record (last write wins)
    pub fn apply_to(self, record: &mut Dentist) {
        if let Some(v) = self.name {
            record.name = v;
        }
        if let Some(v) = self.specialty {
            record.specialty = v;
        }
        if let Some(v) = self.address {
            record.address = v;
        }
        if let Some(v) = self.city {
            record.city = v;
        }
        if let Some(v) = self.phone {
            record.phone = v;
        }
        if let Some(v) = self.rating {
            record.rating = v;
        }
        if let Some(v) = self.reviews_count {
            record.reviews_count = v;
        }
        if let Some(v) = self.latitude {
            record.latitude = v;
        }
        if let Some(v) = self.longitude {
            record.longitude = v;
        }
        if let Some(v) = self.opening_hours {
            record.opening_hours = v;
        }
        if let Some(v) = self.website {
            record.website = Some(v);
        }
        if let Some(v) = self.google_maps_link {
            record.google_maps_link = Some(v);
        }
        if let Some(v) = self.photo_url {
            record.photo_url = Some(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_input() -> DentistInput {
        DentistInput {
            name: Some("Dr. A".into()),
            specialty: Some("Orthodontist".into()),
            address: Some("12 Rue X".into()),
            city: Some("Rabat".into()),
            phone: Some("0600000000".into()),
            rating: Some(4.5),
            reviews_count: Some(10),
            latitude: Some(34.02),
            longitude: Some(-6.83),
            opening_hours: Some("9-18".into()),
            website: None,
            google_maps_link: None,
            photo_url: None,
        }
    }

    #[test]
    fn complete_payload_validates() {
        let record = complete_input().validate().expect("should validate");
        assert_eq!(record.name, "Dr. A");
        assert_eq!(record.city, "Rabat");
        assert!(record.photo_url.is_none());
    }

    #[test]
    fn each_required_field_is_enforced() {
        let mutations: Vec<(&str, Box<dyn Fn(&mut DentistInput)>)> = vec![
            ("name", Box::new(|i| i.name = None)),
            ("specialty", Box::new(|i| i.specialty = None)),
            ("address", Box::new(|i| i.address = None)),
            ("city", Box::new(|i| i.city = None)),
            ("phone", Box::new(|i| i.phone = None)),
            ("rating", Box::new(|i| i.rating = None)),
            ("reviewsCount", Box::new(|i| i.reviews_count = None)),
            ("latitude", Box::new(|i| i.latitude = None)),
            ("longitude", Box::new(|i| i.longitude = None)),
            ("openingHours", Box::new(|i| i.opening_hours = None)),
        ];

        for (field, mutate) in mutations {
            let mut input = complete_input();
            mutate(&mut input);
            let errors = input.validate().expect_err("should fail");
            assert!(
                errors.iter().any(|e| e.field == field),
                "expected an error for {field}"
            );
        }
    }

    #[test]
    fn all_problems_reported_at_once() {
        let errors = DentistInput::default().validate().expect_err("should fail");
        assert_eq!(errors.len(), 10);
    }

    #[test]
    fn rating_out_of_range_rejected() {
        let mut input = complete_input();
        input.rating = Some(5.5);
        let errors = input.validate().expect_err("should fail");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "rating");
    }

    #[test]
    fn negative_reviews_count_rejected() {
        let mut input = complete_input();
        input.reviews_count = Some(-1);
        assert!(input.validate().is_err());
    }

    #[test]
    fn empty_string_counts_as_missing() {
        let mut input = complete_input();
        input.name = Some("   ".into());
        let errors = input.validate().expect_err("should fail");
        assert_eq!(errors[0].field, "name");
    }

    #[test]
    fn coordinates_are_not_range_checked() {
        let mut input = complete_input();
        input.latitude = Some(999.0);
        input.longitude = Some(-999.0);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn update_merge_retains_omitted_fields() {
        let record = complete_input().validate().unwrap();
        let mut persisted = Dentist {
            id: record.id,
            name: record.name,
            specialty: record.specialty,
            address: record.address,
            city: record.city,
            phone: record.phone,
            rating: record.rating,
            reviews_count: record.reviews_count,
            latitude: record.latitude,
            longitude: record.longitude,
            opening_hours: record.opening_hours,
            website: record.website,
            google_maps_link: record.google_maps_link,
            photo_url: record.photo_url,
            created_at: "2025-01-01 00:00:00".into(),
            updated_at: "2025-01-01 00:00:00".into(),
        };

        let update = DentistUpdate {
            phone: Some("0611111111".into()),
            ..Default::default()
        };
        update.apply_to(&mut persisted);

        assert_eq!(persisted.phone, "0611111111");
        assert_eq!(persisted.name, "Dr. A");
        assert_eq!(persisted.city, "Rabat");
    }
}
