//! Render model of the dashboard.
//!
//! [`render`] maps a [`DashboardState`] to a [`DashboardView`]: the sidebar
//! entries with their selected/disabled flags and either the loading indicator
//! or the ordered list of widgets. The layout of the main panel is the static
//! table [`LAYOUT`]; titles may contain `{repository}`, which is replaced by
//! the selected repository's label.

use crate::dashboard::{DashboardState, FetchState};
use crate::payload::{Series, StatsPayload};

pub const APP_TITLE: &str = "Timeseries Forecasting";

const REPOSITORY_PLACEHOLDER: &str = "{repository}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesField {
    Created,
    Closed,
    TotalIssues,
    StarsCount,
    ForksCount,
    ClosedAtIssuesWeek,
}

impl SeriesField {
    pub fn series(self, payload: &StatsPayload) -> &Series {
        match self {
            SeriesField::Created => &payload.created,
            SeriesField::Closed => &payload.closed,
            SeriesField::TotalIssues => &payload.total_issues,
            SeriesField::StarsCount => &payload.stars_count,
            SeriesField::ForksCount => &payload.forks_count,
            SeriesField::ClosedAtIssuesWeek => &payload.closed_at_issues_week,
        }
    }
}

/// Which image URL object of the payload a field lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageGroup {
    CreatedAt,
    ClosedAt,
    Pulls,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageField {
    pub group: ImageGroup,
    pub name: &'static str,
}

impl ImageField {
    const fn new(group: ImageGroup, name: &'static str) -> Self {
        Self { group, name }
    }

    pub fn lookup(self, payload: &StatsPayload) -> Option<&str> {
        match self.group {
            ImageGroup::CreatedAt => payload.created_at_image_urls.get(self.name),
            ImageGroup::ClosedAt => payload.closed_at_image_urls.get(self.name),
            ImageGroup::Pulls => payload.pulls_image_urls.get(self.name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: &'static str,
    pub y_axis: &'static str,
    pub field: SeriesField,
}

/// Caption above an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caption {
    Fixed(&'static str),
    /// "`<period>` has maximum number of issues (`<count>`) `<verb>`."
    Peak {
        period: ImageField,
        count: ImageField,
        verb: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSpec {
    pub caption: Caption,
    pub alt: &'static str,
    pub source: ImageField,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    Chart(ChartSpec),
    Image(ImageSpec),
    Heading(&'static str),
    Divider,
}

const fn bar(title: &'static str, y_axis: &'static str, field: SeriesField) -> Block {
    Block::Chart(ChartSpec {
        kind: ChartKind::Bar,
        title,
        y_axis,
        field,
    })
}

const fn line(title: &'static str, y_axis: &'static str, field: SeriesField) -> Block {
    Block::Chart(ChartSpec {
        kind: ChartKind::Line,
        title,
        y_axis,
        field,
    })
}

const fn image(text: &'static str, group: ImageGroup, name: &'static str) -> Block {
    Block::Image(ImageSpec {
        caption: Caption::Fixed(text),
        alt: text,
        source: ImageField::new(group, name),
    })
}

const fn peak_image(
    alt: &'static str,
    name: &'static str,
    period: &'static str,
    count: &'static str,
    verb: &'static str,
) -> Block {
    Block::Image(ImageSpec {
        caption: Caption::Peak {
            period: ImageField::new(ImageGroup::CreatedAt, period),
            count: ImageField::new(ImageGroup::CreatedAt, count),
            verb,
        },
        alt,
        source: ImageField::new(ImageGroup::CreatedAt, name),
    })
}

use ImageGroup::{ClosedAt, CreatedAt, Pulls};
use SeriesField::*;

/// Main panel layout, top to bottom.
pub const LAYOUT: &[Block] = &[
    line("Issues for every repository in last 2 year", "Issues", TotalIssues),
    bar("Monthly Created Issues for {repository} in last 2 year", "Issues", Created),
    bar("Monthly Closed Issues for {repository} in last 2 year", "Issues", Closed),
    bar("Stars for every repository in last 2 year", "Stars", StarsCount),
    bar("Forks for every repository in last 2 year", "Forks", ForksCount),
    bar("Weekly Closed Issues for {repository} in last 24 weeks", "Issues", ClosedAtIssuesWeek),
    image(
        "Stacked bar chart for to plot the created and closed issues for every Repository",
        CreatedAt,
        "stacked_bar_chart",
    ),
    peak_image(
        "Line chart for issues created on particular days of week for every Repository",
        "week_line_chart",
        "week_line_chart1",
        "week_line_chart2",
        "created",
    ),
    peak_image(
        "Line chart for issues closed on particular days of week for every Repository",
        "week_line_chart_closed",
        "week_line_chart_closed1",
        "week_line_chart_closed2",
        "closed",
    ),
    peak_image(
        "Line chart for issues closed on particular months of year for every Repository",
        "month_line_chart_closed",
        "month_line_chart_closed1",
        "month_line_chart_closed2",
        "closed",
    ),
    Block::Divider,
    Block::Heading(
        "Timeseries Forecasting of Created Issues using Tensorflow and Keras LSTM based on past month",
    ),
    image("Model Loss for Created Issues", CreatedAt, "model_loss_image_url"),
    image("LSTM Generated Data for Created Issues", CreatedAt, "lstm_generated_image_url"),
    image("All Issues Data for Created Issues", CreatedAt, "all_issues_data_image"),
    Block::Divider,
    Block::Heading(
        "Timeseries Forecasting of Closed Issues using Tensorflow and Keras LSTM based on past month",
    ),
    image("Model Loss for Closed Issues", ClosedAt, "model_loss_image_url"),
    image("LSTM Generated Data for Closed Issues", ClosedAt, "lstm_generated_image_url"),
    image("All Issues Data for Closed Issues", ClosedAt, "all_issues_data_image"),
    Block::Divider,
    Block::Heading(
        "Timeseries Forecasting of Created Pulls using Tensorflow and Keras LSTM based on past month",
    ),
    image("Pulls Created in last few months.", Pulls, "pull_chart"),
    image("Model Loss for Created Pulls", Pulls, "pull_chart_loss"),
    image("Created Pulls Predictions", Pulls, "pull_chart_predictions"),
    Block::Divider,
    Block::Heading(
        "Timeseries Forecasting of Created Commits using Tensorflow and Keras LSTM based on past month",
    ),
    image("Commits Created in last few months.", Pulls, "commit_chart"),
    image("Model Loss for Created Commits", Pulls, "commit_chart_loss"),
    image("Created Commits Predictions", Pulls, "commit_chart_predictions"),
];

#[derive(Debug, Clone, PartialEq)]
pub struct SidebarItem {
    pub key: String,
    pub label: String,
    pub selected: bool,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartView {
    pub kind: ChartKind,
    pub title: String,
    pub y_axis: String,
    pub series: Series,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageView {
    pub caption: String,
    pub alt: String,
    /// `None` renders a broken image
    pub src: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    Chart(ChartView),
    Image(ImageView),
    Heading(String),
    Divider,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MainPanel {
    Loading,
    Widgets(Vec<Widget>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub title: String,
    pub sidebar: Vec<SidebarItem>,
    pub main: MainPanel,
}

impl DashboardView {
    pub fn widgets(&self) -> &[Widget] {
        match &self.main {
            MainPanel::Loading => &[],
            MainPanel::Widgets(widgets) => widgets,
        }
    }

    pub fn charts(&self) -> impl Iterator<Item = &ChartView> {
        self.widgets().iter().filter_map(|w| match w {
            Widget::Chart(chart) => Some(chart),
            _ => None,
        })
    }

    pub fn images(&self) -> impl Iterator<Item = &ImageView> {
        self.widgets().iter().filter_map(|w| match w {
            Widget::Image(image) => Some(image),
            _ => None,
        })
    }
}

pub fn render(state: &DashboardState) -> DashboardView {
    let sidebar = state
        .catalog()
        .repositories()
        .iter()
        .map(|option| SidebarItem {
            key: option.key.clone(),
            label: option.label.clone(),
            selected: state.is_selected(option),
            disabled: state.is_disabled(option),
        })
        .collect();

    let label = &state.selected().label;
    let main = match state.fetch_state() {
        FetchState::Loading => MainPanel::Loading,
        FetchState::Loaded(payload) => MainPanel::Widgets(render_widgets(label, payload)),
        FetchState::Empty => MainPanel::Widgets(render_widgets(label, &StatsPayload::empty())),
    };

    DashboardView {
        title: APP_TITLE.to_string(),
        sidebar,
        main,
    }
}

/// Bind every block of [`LAYOUT`] to `payload`.
pub fn render_widgets(repository: &str, payload: &StatsPayload) -> Vec<Widget> {
    LAYOUT
        .iter()
        .map(|block| match *block {
            Block::Chart(spec) => Widget::Chart(ChartView {
                kind: spec.kind,
                title: spec.title.replace(REPOSITORY_PLACEHOLDER, repository),
                y_axis: spec.y_axis.to_string(),
                series: spec.field.series(payload).clone(),
            }),
            Block::Image(spec) => Widget::Image(ImageView {
                caption: caption(spec, payload),
                alt: spec.alt.to_string(),
                src: spec.source.lookup(payload).map(str::to_string),
            }),
            Block::Heading(text) => Widget::Heading(text.to_string()),
            Block::Divider => Widget::Divider,
        })
        .collect()
}

fn caption(spec: ImageSpec, payload: &StatsPayload) -> String {
    match spec.caption {
        Caption::Fixed(text) => text.to_string(),
        Caption::Peak { period, count, verb } => {
            match (period.lookup(payload), count.lookup(payload)) {
                (Some(period), Some(count)) => {
                    format!("{period} has maximum number of issues ({count}) {verb}.")
                }
                // nothing to report without both values
                _ => spec.alt.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RepositoryCatalog;
    use crate::dashboard::{FetchError, StalePolicy};
    use serde_json::json;

    fn loaded(value: serde_json::Value) -> DashboardState {
        let mut state = DashboardState::new(RepositoryCatalog::default(), StalePolicy::default());
        let ticket = state.current_ticket();
        state.resolve(&ticket, Ok(serde_json::from_value(value).unwrap()));
        state
    }

    #[test]
    fn test_loading_view() {
        let state = DashboardState::new(RepositoryCatalog::default(), StalePolicy::default());
        let view = render(&state);

        assert_eq!(view.title, "Timeseries Forecasting");
        assert_eq!(view.main, MainPanel::Loading);
        assert_eq!(view.sidebar.len(), 11);

        for item in &view.sidebar {
            let is_default = item.key == "angular/angular";
            assert_eq!(item.selected, is_default);
            assert_eq!(item.disabled, !is_default);
        }
    }

    #[test]
    fn test_created_and_closed_bar_charts() {
        let view = render(&loaded(json!({"created": [1, 2, 3], "closed": [0, 1, 1]})));

        let bars: Vec<_> = view
            .charts()
            .filter(|c| c.kind == ChartKind::Bar && !c.series.is_empty())
            .collect();
        assert_eq!(bars.len(), 2);

        assert_eq!(bars[0].title, "Monthly Created Issues for Angular in last 2 year");
        assert_eq!(bars[0].y_axis, "Issues");
        assert_eq!(serde_json::to_value(&bars[0].series).unwrap(), json!([1, 2, 3]));

        assert_eq!(bars[1].title, "Monthly Closed Issues for Angular in last 2 year");
        assert_eq!(serde_json::to_value(&bars[1].series).unwrap(), json!([0, 1, 1]));

        assert!(view.sidebar.iter().all(|item| !item.disabled));
    }

    #[test]
    fn test_layout_counts() {
        let view = render(&loaded(json!({})));
        assert_eq!(view.charts().count(), 6);
        assert_eq!(view.charts().filter(|c| c.kind == ChartKind::Line).count(), 1);
        assert_eq!(view.images().count(), 16);
        assert_eq!(
            view.widgets().iter().filter(|w| **w == Widget::Divider).count(),
            4
        );
    }

    #[test]
    fn test_failed_fetch_renders_empty_widgets() {
        let mut state = loaded(json!({"created": [5]}));
        let ticket = state.select("golang/go").unwrap();
        state.resolve(&ticket, Err(FetchError::Transport("offline".into())));

        let view = render(&state);
        assert!(view.charts().all(|c| c.series.is_empty()));
        assert!(view.images().all(|i| i.src.is_none()));
        assert!(view
            .charts()
            .any(|c| c.title == "Weekly Closed Issues for Go in last 24 weeks"));
        assert_eq!(view.sidebar.iter().filter(|i| i.selected).count(), 1);
    }

    #[test]
    fn test_images_bound_to_groups() {
        let view = render(&loaded(json!({
            "createdAtImageUrls": {"model_loss_image_url": "https://storage.example/created_loss.png"},
            "closedAtImageUrls": {"model_loss_image_url": "https://storage.example/closed_loss.png"},
            "pullsImageUrls": {"commit_chart_predictions": "https://storage.example/commits.png"}
        })));

        let src_of = |alt: &str| {
            view.images()
                .find(|i| i.alt == alt)
                .and_then(|i| i.src.clone())
        };
        assert_eq!(
            src_of("Model Loss for Created Issues").as_deref(),
            Some("https://storage.example/created_loss.png")
        );
        assert_eq!(
            src_of("Model Loss for Closed Issues").as_deref(),
            Some("https://storage.example/closed_loss.png")
        );
        assert_eq!(
            src_of("Created Commits Predictions").as_deref(),
            Some("https://storage.example/commits.png")
        );
        assert_eq!(src_of("Created Pulls Predictions"), None);
    }

    #[test]
    fn test_peak_caption() {
        let view = render(&loaded(json!({
            "createdAtImageUrls": {
                "week_line_chart": "https://storage.example/week.png",
                "week_line_chart1": "Tuesday",
                "week_line_chart2": "311",
                "month_line_chart_closed1": "March"
            }
        })));

        let week = view
            .images()
            .find(|i| i.src.as_deref() == Some("https://storage.example/week.png"))
            .unwrap();
        assert_eq!(week.caption, "Tuesday has maximum number of issues (311) created.");

        let month = view
            .images()
            .find(|i| i.alt.contains("particular months"))
            .unwrap();
        assert_eq!(month.caption, month.alt);
    }
}
