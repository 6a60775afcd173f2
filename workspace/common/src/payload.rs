//! Wire types exchanged with the forecasting service.
//!
//! Every field of [`StatsPayload`] is optional on the wire. Decoding any JSON
//! object succeeds: a field that is missing, `null` or of an unexpected shape
//! takes its empty default so rendering never has to null-check. The raw value
//! of such a field is kept in `extra`, so a decoded payload always encodes back
//! to the JSON it came from.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Path of the forecasting endpoint, both on the dashboard server and upstream.
pub const GITHUB_STATS_PATH: &str = "/api/github";

/// Request body for [`GITHUB_STATS_PATH`].
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate, PartialEq, Eq)]
pub struct GithubRequest {
    /// Repository key in `owner/name` form
    #[validate(custom(function = "validate_repository_key"))]
    pub repository: String,
}

impl GithubRequest {
    pub fn new(repository: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
        }
    }
}

/// Accepts `owner/name` with both segments non-empty and free of whitespace.
pub fn validate_repository_key(key: &str) -> Result<(), ValidationError> {
    let mut parts = key.split('/');
    let well_formed = match (parts.next(), parts.next(), parts.next()) {
        (Some(owner), Some(name), None) => {
            !owner.is_empty()
                && !name.is_empty()
                && !key.chars().any(char::is_whitespace)
        }
        _ => false,
    };

    if well_formed {
        Ok(())
    } else {
        Err(ValidationError::new("repository_key"))
    }
}

/// One data point of a chart series.
///
/// The service emits either bare numbers or `[label, value]` pairs. Numbers
/// are kept as [`Number`] so integers are not rewritten as floats. Anything
/// else, `null` included, is kept verbatim and plotted as a gap.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SeriesPoint {
    Value(Number),
    Labeled(String, Number),
    Other(Value),
}

impl SeriesPoint {
    pub fn label(&self) -> Option<&str> {
        match self {
            SeriesPoint::Labeled(label, _) => Some(label),
            SeriesPoint::Value(_) | SeriesPoint::Other(_) => None,
        }
    }

    /// Plotted value; `NaN` for points without a number.
    pub fn value(&self) -> f64 {
        match self {
            SeriesPoint::Value(n) | SeriesPoint::Labeled(_, n) => n.as_f64().unwrap_or(f64::NAN),
            SeriesPoint::Other(_) => f64::NAN,
        }
    }
}

/// Numeric series; `null` and absent both decode to an empty series.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(from = "Option<Vec<SeriesPoint>>")]
pub struct Series(pub Vec<SeriesPoint>);

impl From<Option<Vec<SeriesPoint>>> for Series {
    fn from(points: Option<Vec<SeriesPoint>>) -> Self {
        Series(points.unwrap_or_default())
    }
}

impl Series {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.0
    }

    /// X-axis categories: the point labels, or 1-based positions for bare values.
    pub fn categories(&self) -> Vec<String> {
        self.0
            .iter()
            .enumerate()
            .map(|(idx, point)| match point.label() {
                Some(label) => label.to_string(),
                None => (idx + 1).to_string(),
            })
            .collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.0.iter().map(SeriesPoint::value).collect()
    }
}

/// Forecast and aggregate chart URLs for created or closed issues.
///
/// The `*1`/`*2` fields carry the weekday or month with the most issues and the
/// matching count, as plain strings.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct IssueImageUrls {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_loss_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lstm_generated_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_issues_data_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stacked_bar_chart: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_line_chart: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_line_chart1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_line_chart2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_line_chart_closed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_line_chart_closed1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_line_chart_closed2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month_line_chart_closed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month_line_chart_closed1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month_line_chart_closed2: Option<String>,
    /// Fields this dashboard does not render, or could not decode
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Pull request and commit forecast chart URLs.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct PullsImageUrls {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull_chart: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull_chart_loss: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull_chart_predictions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_chart: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_chart_loss: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_chart_predictions: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl IssueImageUrls {
    /// Look up a field by its wire name.
    pub fn get(&self, field: &str) -> Option<&str> {
        let value = match field {
            "model_loss_image_url" => &self.model_loss_image_url,
            "lstm_generated_image_url" => &self.lstm_generated_image_url,
            "all_issues_data_image" => &self.all_issues_data_image,
            "stacked_bar_chart" => &self.stacked_bar_chart,
            "week_line_chart" => &self.week_line_chart,
            "week_line_chart1" => &self.week_line_chart1,
            "week_line_chart2" => &self.week_line_chart2,
            "week_line_chart_closed" => &self.week_line_chart_closed,
            "week_line_chart_closed1" => &self.week_line_chart_closed1,
            "week_line_chart_closed2" => &self.week_line_chart_closed2,
            "month_line_chart_closed" => &self.month_line_chart_closed,
            "month_line_chart_closed1" => &self.month_line_chart_closed1,
            "month_line_chart_closed2" => &self.month_line_chart_closed2,
            _ => return None,
        };
        value.as_deref()
    }
}

impl PullsImageUrls {
    /// Look up a field by its wire name.
    pub fn get(&self, field: &str) -> Option<&str> {
        let value = match field {
            "pull_chart" => &self.pull_chart,
            "pull_chart_loss" => &self.pull_chart_loss,
            "pull_chart_predictions" => &self.pull_chart_predictions,
            "commit_chart" => &self.commit_chart,
            "commit_chart_loss" => &self.commit_chart_loss,
            "commit_chart_predictions" => &self.commit_chart_predictions,
            _ => return None,
        };
        value.as_deref()
    }
}

fn is_default<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

/// Decodes the fields of one JSON object one at a time.
///
/// A field is stored typed only when it decodes and encodes back to the same
/// value without being skipped on encode; otherwise the raw value moves to
/// `extra` and the typed field stays at its default.
struct LenientFields {
    raw: Map<String, Value>,
    extra: BTreeMap<String, Value>,
}

impl LenientFields {
    fn from_deserializer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self {
            raw: Map::deserialize(deserializer)?,
            extra: BTreeMap::new(),
        })
    }

    fn take<T>(&mut self, key: &str) -> T
    where
        T: DeserializeOwned + Serialize + Default + PartialEq,
    {
        let Some(value) = self.raw.remove(key) else {
            return T::default();
        };

        match serde_json::from_value::<T>(value.clone()) {
            Ok(typed)
                if !is_default(&typed)
                    && serde_json::to_value(&typed).is_ok_and(|encoded| encoded == value) =>
            {
                typed
            }
            _ => {
                self.extra.insert(key.to_string(), value);
                T::default()
            }
        }
    }

    /// Everything not taken, plus the values that did not decode.
    fn into_extra(mut self) -> BTreeMap<String, Value> {
        self.extra.extend(self.raw);
        self.extra
    }
}

impl<'de> Deserialize<'de> for IssueImageUrls {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = LenientFields::from_deserializer(deserializer)?;
        Ok(Self {
            model_loss_image_url: fields.take("model_loss_image_url"),
            lstm_generated_image_url: fields.take("lstm_generated_image_url"),
            all_issues_data_image: fields.take("all_issues_data_image"),
            stacked_bar_chart: fields.take("stacked_bar_chart"),
            week_line_chart: fields.take("week_line_chart"),
            week_line_chart1: fields.take("week_line_chart1"),
            week_line_chart2: fields.take("week_line_chart2"),
            week_line_chart_closed: fields.take("week_line_chart_closed"),
            week_line_chart_closed1: fields.take("week_line_chart_closed1"),
            week_line_chart_closed2: fields.take("week_line_chart_closed2"),
            month_line_chart_closed: fields.take("month_line_chart_closed"),
            month_line_chart_closed1: fields.take("month_line_chart_closed1"),
            month_line_chart_closed2: fields.take("month_line_chart_closed2"),
            extra: fields.into_extra(),
        })
    }
}

impl<'de> Deserialize<'de> for PullsImageUrls {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = LenientFields::from_deserializer(deserializer)?;
        Ok(Self {
            pull_chart: fields.take("pull_chart"),
            pull_chart_loss: fields.take("pull_chart_loss"),
            pull_chart_predictions: fields.take("pull_chart_predictions"),
            commit_chart: fields.take("commit_chart"),
            commit_chart_loss: fields.take("commit_chart_loss"),
            commit_chart_predictions: fields.take("commit_chart_predictions"),
            extra: fields.into_extra(),
        })
    }
}

impl<'de> Deserialize<'de> for StatsPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = LenientFields::from_deserializer(deserializer)?;
        Ok(Self {
            created: fields.take("created"),
            closed: fields.take("closed"),
            total_issues: fields.take("total_issues"),
            stars_count: fields.take("stars_count"),
            forks_count: fields.take("forks_count"),
            closed_at_issues_week: fields.take("closed_at_issues_week"),
            created_at_image_urls: fields.take("createdAtImageUrls"),
            closed_at_image_urls: fields.take("closedAtImageUrls"),
            pulls_image_urls: fields.take("pullsImageUrls"),
            extra: fields.into_extra(),
        })
    }
}

/// Statistics and forecast bundle for one repository.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct StatsPayload {
    #[serde(skip_serializing_if = "Series::is_empty")]
    pub created: Series,
    #[serde(skip_serializing_if = "Series::is_empty")]
    pub closed: Series,
    #[serde(skip_serializing_if = "Series::is_empty")]
    pub total_issues: Series,
    #[serde(skip_serializing_if = "Series::is_empty")]
    pub stars_count: Series,
    #[serde(skip_serializing_if = "Series::is_empty")]
    pub forks_count: Series,
    #[serde(skip_serializing_if = "Series::is_empty")]
    pub closed_at_issues_week: Series,
    #[serde(rename = "createdAtImageUrls", skip_serializing_if = "is_default")]
    pub created_at_image_urls: IssueImageUrls,
    #[serde(rename = "closedAtImageUrls", skip_serializing_if = "is_default")]
    pub closed_at_image_urls: IssueImageUrls,
    #[serde(rename = "pullsImageUrls", skip_serializing_if = "is_default")]
    pub pulls_image_urls: PullsImageUrls,
    /// Top-level fields this dashboard does not render, or could not decode
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl StatsPayload {
    /// The payload shown after a failed fetch.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(GithubRequest::new("angular/angular")).unwrap();
        assert_eq!(body, json!({"repository": "angular/angular"}));
    }

    #[test]
    fn test_validate_repository_key() {
        assert!(GithubRequest::new("golang/go").validate().is_ok());
        assert!(GithubRequest::new("SebastianM/angular-google-maps").validate().is_ok());
        assert!(GithubRequest::new("golang").validate().is_err());
        assert!(GithubRequest::new("/go").validate().is_err());
        assert!(GithubRequest::new("golang/").validate().is_err());
        assert!(GithubRequest::new("a/b/c").validate().is_err());
        assert!(GithubRequest::new("golang/ go").validate().is_err());
    }

    #[test]
    fn test_decode_bare_series() {
        let payload: StatsPayload =
            serde_json::from_value(json!({"created": [1, 2, 3], "closed": [0, 1, 1]})).unwrap();
        assert_eq!(payload.created.values(), vec![1.0, 2.0, 3.0]);
        assert_eq!(payload.created.categories(), vec!["1", "2", "3"]);
        assert_eq!(payload.closed.len(), 3);
        assert!(payload.total_issues.is_empty());
        assert_eq!(payload.created_at_image_urls, IssueImageUrls::default());
    }

    #[test]
    fn test_decode_labeled_series() {
        let payload: StatsPayload = serde_json::from_value(json!({
            "stars_count": [["angular", 91000], ["react", 220000.5]]
        }))
        .unwrap();
        assert_eq!(payload.stars_count.categories(), vec!["angular", "react"]);
        assert_eq!(payload.stars_count.values(), vec![91000.0, 220000.5]);
    }

    #[test]
    fn test_null_fields_decode_to_defaults() {
        let input = json!({
            "created": null,
            "createdAtImageUrls": {"model_loss_image_url": null}
        });
        let payload: StatsPayload = serde_json::from_value(input.clone()).unwrap();

        assert!(payload.created.is_empty());
        assert_eq!(payload.created_at_image_urls.get("model_loss_image_url"), None);
        assert_eq!(serde_json::to_value(&payload).unwrap(), input);
    }

    #[test]
    fn test_null_point_plotted_as_gap() {
        let payload: StatsPayload =
            serde_json::from_str(r#"{"created":[1,null,3],"closed":[0,1,1]}"#).unwrap();

        assert_eq!(payload.created.len(), 3);
        assert_eq!(payload.created.categories(), vec!["1", "2", "3"]);
        let values = payload.created.values();
        assert_eq!(values[0], 1.0);
        assert!(values[1].is_nan());
        assert_eq!(values[2], 3.0);
        assert_eq!(payload.closed.values(), vec![0.0, 1.0, 1.0]);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"created": [1, null, 3], "closed": [0, 1, 1]})
        );
    }

    #[test]
    fn test_image_url_lookup() {
        let payload: StatsPayload = serde_json::from_value(json!({
            "closedAtImageUrls": {"lstm_generated_image_url": "https://storage.example/lstm.png"},
            "pullsImageUrls": {"commit_chart_loss": "https://storage.example/commit_loss.png"}
        }))
        .unwrap();
        assert_eq!(
            payload.closed_at_image_urls.get("lstm_generated_image_url"),
            Some("https://storage.example/lstm.png")
        );
        assert_eq!(payload.closed_at_image_urls.get("stacked_bar_chart"), None);
        assert_eq!(payload.closed_at_image_urls.get("no_such_field"), None);
        assert_eq!(
            payload.pulls_image_urls.get("commit_chart_loss"),
            Some("https://storage.example/commit_loss.png")
        );
    }

    #[test]
    fn test_empty_object_is_empty_payload() {
        let payload: StatsPayload = serde_json::from_str("{}").unwrap();
        assert_eq!(payload, StatsPayload::empty());
    }

    #[test]
    fn test_off_type_fields_fall_back_to_defaults() {
        let input = json!({
            "created": "lots",
            "closed": [0, 1, 1],
            "createdAtImageUrls": {
                "week_line_chart": "https://storage.example/week.png",
                "week_line_chart2": 42
            },
            "pullsImageUrls": ["not", "an", "object"]
        });

        let payload: StatsPayload = serde_json::from_value(input.clone()).unwrap();

        assert!(payload.created.is_empty());
        assert_eq!(payload.closed.values(), vec![0.0, 1.0, 1.0]);
        assert_eq!(
            payload.created_at_image_urls.get("week_line_chart"),
            Some("https://storage.example/week.png")
        );
        assert_eq!(payload.created_at_image_urls.get("week_line_chart2"), None);
        assert_eq!(payload.pulls_image_urls, PullsImageUrls::default());
        assert_eq!(serde_json::to_value(&payload).unwrap(), input);
    }

    #[test]
    fn test_empty_collections_survive_encode() {
        let input = json!({"created": [], "closedAtImageUrls": {}, "stars_count": null});
        let payload: StatsPayload = serde_json::from_value(input.clone()).unwrap();

        assert!(payload.created.is_empty());
        assert_eq!(serde_json::to_value(&payload).unwrap(), input);
    }

    #[test]
    fn test_non_object_body_is_an_error() {
        assert!(serde_json::from_value::<StatsPayload>(json!([1, 2, 3])).is_err());
        assert!(serde_json::from_str::<StatsPayload>("not json").is_err());
    }

    #[test]
    fn test_encode_reproduces_input() {
        let input = json!({
            "created": [1, 2, 3],
            "closed": [0, 1, 1],
            "stars_count": [["d3", 105000]],
            "createdAtImageUrls": {
                "model_loss_image_url": "https://storage.example/loss.png",
                "week_line_chart1": "Monday",
                "week_line_chart2": "42"
            },
            "pullsImageUrls": {"pull_chart": "https://storage.example/pulls.png"},
            "generated_at": "2022-11-30"
        });

        let payload: StatsPayload = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(payload.extra.get("generated_at"), Some(&json!("2022-11-30")));
        assert_eq!(serde_json::to_value(&payload).unwrap(), input);
    }
}
