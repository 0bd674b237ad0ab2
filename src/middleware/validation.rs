//! Field-level validation of request bodies and path parameters.
//!
//! Every check records at most one error per field and the first failing check wins. Objects must
//! carry exactly the expected fields.

use actix_web::{http::StatusCode, HttpResponse};
use serde::Serialize;
use serde_json::{Map, Value};
use url::Url;
use uuid::Uuid;

use crate::models::{
    picture::Picture,
    trip::{NewTrip, TripDestination},
    weather::{Weather, WeatherDesc},
};

pub const FAILED_VALIDATION_MESSAGE: &str = "Invalid argument(s).";

/// Default maximum length of free-text fields.
pub const MAX_TEXT_LENGTH: usize = 256;

// Largest integer a JSON client can represent exactly (2^53 - 1).
const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

const WEATHERBIT_HOSTS: &[&str] = &["cdn.weatherbit.io"];
const PIXABAY_HOSTS: &[&str] = &["pixabay.com", "cdn.pixabay.com"];

const TEMP_RANGE: (f64, f64) = (-90.0, 60.0);
const LON_RANGE: (f64, f64) = (-180.0, 180.0);
const LAT_RANGE: (f64, f64) = (-90.0, 90.0);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub location: &'static str,
    pub path: String,
    pub msg: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    pub message: String,
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self {
            message: FAILED_VALIDATION_MESSAGE.to_string(),
            errors,
        }
    }

    pub fn into_response(self) -> HttpResponse {
        HttpResponse::build(StatusCode::UNPROCESSABLE_ENTITY).json(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DestinationQuery {
    pub query: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherQuery {
    pub lon: f64,
    pub lat: f64,
    pub num_days: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PictureQuery {
    pub name: String,
    pub country_name: String,
}

/// Escapes the characters that are significant in HTML.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '/' => escaped.push_str("&#x2F;"),
            '\\' => escaped.push_str("&#x5C;"),
            '`' => escaped.push_str("&#96;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn format_bound<T: ToString>(bound: Option<T>) -> String {
    bound.map(|b| b.to_string()).unwrap_or_default()
}

/// Collects field errors while walking a JSON document.
struct Checker {
    location: &'static str,
    errors: Vec<FieldError>,
}

impl Checker {
    fn new(location: &'static str) -> Self {
        Self {
            location,
            errors: Vec::new(),
        }
    }

    fn fail(&mut self, path: String, msg: impl Into<String>) {
        self.errors.push(FieldError {
            location: self.location,
            path,
            msg: msg.into(),
        });
    }

    fn finish<T>(self, value: Option<T>) -> Result<T, ValidationErrors> {
        match value {
            Some(value) if self.errors.is_empty() => Ok(value),
            _ => Err(ValidationErrors::new(self.errors)),
        }
    }

    /// The document root, which must be an object.
    fn root<'a>(&mut self, value: &'a Value) -> Option<&'a Map<String, Value>> {
        let root = value.as_object();
        if root.is_none() {
            self.fail(String::new(), "must be an object");
        }
        root
    }

    fn exact_fields(&mut self, obj: &Map<String, Value>, prefix: &str, allowed: &[&str]) {
        for key in obj.keys().filter(|key| !allowed.contains(&key.as_str())) {
            self.fail(join(prefix, key), "unknown field");
        }
    }

    fn object<'a>(
        &mut self,
        obj: &'a Map<String, Value>,
        prefix: &str,
        key: &str,
        allowed: &[&str],
    ) -> Option<&'a Map<String, Value>> {
        let path = join(prefix, key);
        match obj.get(key).and_then(Value::as_object) {
            Some(inner) => {
                self.exact_fields(inner, &path, allowed);
                Some(inner)
            }
            None => {
                self.fail(path, "must be an object");
                None
            }
        }
    }

    /// Trimmed string that is neither blank nor longer than `max` characters before trimming.
    fn string_not_blank(
        &mut self,
        obj: &Map<String, Value>,
        prefix: &str,
        key: &str,
        max: usize,
    ) -> Option<String> {
        let path = join(prefix, key);
        let Some(text) = obj.get(key).and_then(Value::as_str) else {
            self.fail(path, "must be a string");
            return None;
        };
        if text.chars().count() > max {
            self.fail(path, format!("length must not exceed {} character(s)", max));
            return None;
        }
        let trimmed = text.trim();
        if trimmed.is_empty() {
            self.fail(path, "must not be empty or contain only whitespace characters");
            return None;
        }
        Some(trimmed.to_string())
    }

    fn number_in_range(
        &mut self,
        obj: &Map<String, Value>,
        prefix: &str,
        key: &str,
        (min, max): (f64, f64),
    ) -> Option<f64> {
        let number = obj
            .get(key)
            .and_then(Value::as_f64)
            .filter(|n| n.is_finite() && min <= *n && *n <= max);
        if number.is_none() {
            self.fail(
                join(prefix, key),
                format!("must be a number in range [{}, {}]", min, max),
            );
        }
        number
    }

    /// Like `number_in_range` but `null` and absent are accepted as `None`.
    fn optional_number_in_range(
        &mut self,
        obj: &Map<String, Value>,
        prefix: &str,
        key: &str,
        range: (f64, f64),
    ) -> Option<Option<f64>> {
        match obj.get(key) {
            None | Some(Value::Null) => Some(None),
            Some(_) => self.number_in_range(obj, prefix, key, range).map(Some),
        }
    }

    fn integer_in_range(
        &mut self,
        obj: &Map<String, Value>,
        prefix: &str,
        key: &str,
        min: Option<i64>,
        max: Option<i64>,
    ) -> Option<i64> {
        let integer = obj
            .get(key)
            .and_then(as_safe_integer)
            .filter(|n| min.map_or(true, |min| min <= *n) && max.map_or(true, |max| *n <= max));
        if integer.is_none() {
            self.fail(
                join(prefix, key),
                format!(
                    "must be an integer in range [{}, {}]",
                    format_bound(min),
                    format_bound(max)
                ),
            );
        }
        integer
    }

    fn boolean(&mut self, obj: &Map<String, Value>, prefix: &str, key: &str) -> Option<bool> {
        let flag = obj.get(key).and_then(Value::as_bool);
        if flag.is_none() {
            self.fail(join(prefix, key), "must be a boolean");
        }
        flag
    }

    /// An http(s) URL whose host is one of `hosts`.
    fn approved_url(
        &mut self,
        obj: &Map<String, Value>,
        prefix: &str,
        key: &str,
        hosts: &[&str],
    ) -> Option<String> {
        let path = join(prefix, key);
        let parsed = obj
            .get(key)
            .and_then(Value::as_str)
            .and_then(|text| Url::parse(text.trim()).ok())
            .filter(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some());
        let Some(url) = parsed else {
            self.fail(path, "must be a valid URL");
            return None;
        };
        if !url.host_str().is_some_and(|host| hosts.contains(&host)) {
            self.fail(path, "must be an approved URL");
            return None;
        }
        Some(url.to_string())
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn as_safe_integer(value: &Value) -> Option<i64> {
    let integer = match value.as_i64() {
        Some(n) => n,
        None => {
            // 3.0 is an integer for a JSON client.
            let n = value.as_f64()?;
            if !n.is_finite() || n.fract() != 0.0 || n.abs() > MAX_SAFE_INTEGER as f64 {
                return None;
            }
            n as i64
        }
    };
    (integer.abs() <= MAX_SAFE_INTEGER).then_some(integer)
}

/// `{query}`
pub fn validate_destination_query(body: &Value) -> Result<DestinationQuery, ValidationErrors> {
    let mut checker = Checker::new("body");
    let query = checker.root(body).and_then(|obj| {
        checker.exact_fields(obj, "", &["query"]);
        checker.string_not_blank(obj, "", "query", MAX_TEXT_LENGTH)
    });
    checker.finish(query.map(|query| DestinationQuery { query }))
}

/// `{lon, lat, numDays}`
pub fn validate_weather_query(body: &Value) -> Result<WeatherQuery, ValidationErrors> {
    let mut checker = Checker::new("body");
    let query = checker.root(body).and_then(|obj| {
        checker.exact_fields(obj, "", &["lon", "lat", "numDays"]);
        let lon = checker.number_in_range(obj, "", "lon", LON_RANGE);
        let lat = checker.number_in_range(obj, "", "lat", LAT_RANGE);
        let num_days = checker.integer_in_range(obj, "", "numDays", Some(0), None);
        Some(WeatherQuery {
            lon: lon?,
            lat: lat?,
            num_days: u64::try_from(num_days?).ok()?,
        })
    });
    checker.finish(query)
}

/// `{name, countryName}`
pub fn validate_picture_query(body: &Value) -> Result<PictureQuery, ValidationErrors> {
    let mut checker = Checker::new("body");
    let query = checker.root(body).and_then(|obj| {
        checker.exact_fields(obj, "", &["name", "countryName"]);
        let name = checker.string_not_blank(obj, "", "name", MAX_TEXT_LENGTH);
        let country_name = checker.string_not_blank(obj, "", "countryName", MAX_TEXT_LENGTH);
        Some(PictureQuery {
            name: name?,
            country_name: country_name?,
        })
    });
    checker.finish(query)
}

/// A trip to save. Free text coming back from the client is HTML-escaped.
pub fn validate_new_trip(body: &Value) -> Result<NewTrip, ValidationErrors> {
    let mut checker = Checker::new("body");
    let trip = checker.root(body).and_then(|obj| {
        checker.exact_fields(
            obj,
            "",
            &[
                "destination",
                "dateDeparting",
                "dateReturning",
                "weather",
                "picture",
            ],
        );
        let destination = check_destination(&mut checker, obj);
        let date_departing = checker.integer_in_range(obj, "", "dateDeparting", Some(0), None);
        let date_returning = checker.integer_in_range(obj, "", "dateReturning", Some(0), None);
        let weather = check_weather(&mut checker, obj);
        let picture = check_picture(&mut checker, obj);
        Some(NewTrip {
            destination: destination?,
            date_departing: date_departing?,
            date_returning: date_returning?,
            weather: weather?,
            picture: picture?,
        })
    });
    checker.finish(trip)
}

fn check_destination(checker: &mut Checker, obj: &Map<String, Value>) -> Option<TripDestination> {
    let prefix = "destination";
    let inner = checker.object(obj, "", prefix, &["lon", "lat", "name", "countryName"])?;
    let lon = checker.number_in_range(inner, prefix, "lon", LON_RANGE);
    let lat = checker.number_in_range(inner, prefix, "lat", LAT_RANGE);
    let name = checker.string_not_blank(inner, prefix, "name", MAX_TEXT_LENGTH);
    let country_name = checker.string_not_blank(inner, prefix, "countryName", MAX_TEXT_LENGTH);
    Some(TripDestination {
        lon: lon?,
        lat: lat?,
        name: escape_html(&name?),
        country_name: escape_html(&country_name?),
    })
}

fn check_weather(checker: &mut Checker, obj: &Map<String, Value>) -> Option<Weather> {
    let prefix = "weather";
    let inner = checker.object(
        obj,
        "",
        prefix,
        &["isCurrent", "temp", "tempMin", "tempMax", "desc"],
    )?;
    let is_current = checker.boolean(inner, prefix, "isCurrent");
    let temp = checker.number_in_range(inner, prefix, "temp", TEMP_RANGE);
    let temp_min = checker.optional_number_in_range(inner, prefix, "tempMin", TEMP_RANGE);
    let temp_max = checker.optional_number_in_range(inner, prefix, "tempMax", TEMP_RANGE);

    let desc_prefix = "weather.desc";
    let desc = checker
        .object(inner, prefix, "desc", &["desc", "iconUrl"])
        .and_then(|desc_obj| {
            let desc = checker.string_not_blank(desc_obj, desc_prefix, "desc", MAX_TEXT_LENGTH);
            let icon_url = checker.approved_url(desc_obj, desc_prefix, "iconUrl", WEATHERBIT_HOSTS);
            Some(WeatherDesc {
                desc: escape_html(&desc?),
                icon_url: icon_url?,
            })
        });

    Some(Weather {
        is_current: is_current?,
        temp: temp?,
        temp_min: temp_min?,
        temp_max: temp_max?,
        desc: desc?,
    })
}

fn check_picture(checker: &mut Checker, obj: &Map<String, Value>) -> Option<Picture> {
    let prefix = "picture";
    let inner = checker.object(obj, "", prefix, &["imageUrl"])?;
    let image_url = checker.approved_url(inner, prefix, "imageUrl", PIXABAY_HOSTS)?;
    Some(Picture { image_url })
}

/// The `tripId` path parameter.
pub fn validate_trip_id(raw: &str) -> Result<Uuid, ValidationErrors> {
    let mut checker = Checker::new("params");
    let trip_id = Uuid::parse_str(raw).ok();
    if trip_id.is_none() {
        checker.fail("tripId".to_string(), "must be a valid trip ID");
    }
    checker.finish(trip_id)
}
