use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use compute::{scenario_values, AnalyticsSummary, CarbonMetrics, ScenarioValue, CO2_PER_CARBON};
use formats::CarbonLookup;
use foundation::{parse_year_list, YearLabel};
use http::StatusCode;
use layers::{
    carbon_legend, land_cover_legend, AdminPlan, CarbonLegend, LayerPlan, LegendEntry, ViewMode,
};
use presentation::{ranking_bars, summary_cards, RankingBar, RegionPanel, StatCard, TrendSeries};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::ServerConfig;
use crate::dataset::{DatasetHandle, LoadState};

pub type ApiError = (StatusCode, Json<Value>);
type ApiResult<T> = Result<Json<T>, ApiError>;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub dataset: Arc<DatasetHandle>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: ServerConfig, dataset: Arc<DatasetHandle>) -> Self {
        Self {
            config: Arc::new(config),
            dataset,
            http: reqwest::Client::new(),
        }
    }

    fn ready_lookup(&self) -> Result<Arc<CarbonLookup>, ApiError> {
        match self.dataset.state() {
            LoadState::Ready(lookup) => Ok(lookup),
            other => Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": other.label() })),
            )),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/status", get(status))
        .route("/api/summary", get(summary))
        .route("/api/trend", get(trend))
        .route("/api/top", get(top))
        .route("/api/regions/:name", get(region))
        .route("/api/scenarios", get(scenarios))
        .route("/api/layers", get(layer_plan))
        .with_state(state)
}

pub fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    (status, Json(json!({ "error": msg.into() })))
}

fn parse_param<T: FromStr>(name: &str, raw: Option<&str>) -> Result<Option<T>, ApiError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|_| api_error(StatusCode::BAD_REQUEST, format!("invalid {name}: {s}"))),
    }
}

fn parse_years(state: &AppState, raw: Option<&str>) -> Result<Vec<YearLabel>, ApiError> {
    match raw {
        None => Ok(state.config.schema.years.clone()),
        Some(raw) => {
            let years = parse_year_list(raw);
            if years.is_empty() {
                return Err(api_error(StatusCode::BAD_REQUEST, "years must not be empty"));
            }
            Ok(years)
        }
    }
}

fn year_or(raw: Option<&str>, fallback: &YearLabel) -> YearLabel {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(YearLabel::new)
        .unwrap_or_else(|| fallback.clone())
}

pub async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub regions: usize,
    pub skipped: usize,
}

pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let load = state.dataset.state();
    let (regions, skipped) = match &load {
        LoadState::Ready(lookup) => (lookup.len(), lookup.skipped()),
        _ => (0, 0),
    };
    Json(StatusResponse {
        status: load.label(),
        regions,
        skipped,
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct SummaryParams {
    pub latest: Option<String>,
    pub top: Option<String>,
    pub years: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: AnalyticsSummary,
    pub cards: Vec<StatCard>,
    pub trend: TrendSeries,
    pub ranking: Vec<RankingBar>,
}

pub async fn summary(
    State(state): State<AppState>,
    Query(params): Query<SummaryParams>,
) -> ApiResult<SummaryResponse> {
    let lookup = state.ready_lookup()?;
    let years = parse_years(&state, params.years.as_deref())?;
    let latest = year_or(params.latest.as_deref(), &state.config.latest_year);
    let top_n = parse_param("top", params.top.as_deref())?.unwrap_or(state.config.top_n);

    let summary = AnalyticsSummary::compute(&lookup, &years, &latest, top_n);
    Ok(Json(SummaryResponse {
        cards: summary_cards(&summary),
        trend: TrendSeries::from_averages(summary.trend()),
        ranking: ranking_bars(&summary.top_regions),
        summary,
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct TrendParams {
    pub years: Option<String>,
}

pub async fn trend(
    State(state): State<AppState>,
    Query(params): Query<TrendParams>,
) -> ApiResult<TrendSeries> {
    let lookup = state.ready_lookup()?;
    let years = parse_years(&state, params.years.as_deref())?;
    let metrics = CarbonMetrics::new(&lookup);
    Ok(Json(TrendSeries::from_averages(&metrics.trend_series(&years))))
}

#[derive(Debug, Default, Deserialize)]
pub struct TopParams {
    pub year: Option<String>,
    pub limit: Option<String>,
}

pub async fn top(
    State(state): State<AppState>,
    Query(params): Query<TopParams>,
) -> ApiResult<Vec<RankingBar>> {
    let lookup = state.ready_lookup()?;
    let year = year_or(params.year.as_deref(), &state.config.latest_year);
    let limit = parse_param("limit", params.limit.as_deref())?.unwrap_or(state.config.top_n);
    let ranked = CarbonMetrics::new(&lookup).top_regions(&year, limit);
    Ok(Json(ranking_bars(&ranked)))
}

#[derive(Debug, Default, Deserialize)]
pub struct RegionParams {
    pub year: Option<String>,
}

pub async fn region(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<RegionParams>,
) -> ApiResult<RegionPanel> {
    let lookup = state.ready_lookup()?;
    let year = year_or(params.year.as_deref(), &state.config.latest_year);
    let metrics = CarbonMetrics::new(&lookup);
    RegionPanel::build(&metrics, &name, &year)
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("unknown region: {name}")))
}

#[derive(Debug, Default, Deserialize)]
pub struct ScenarioParams {
    pub carbon: Option<String>,
    pub factor: Option<String>,
}

pub async fn scenarios(Query(params): Query<ScenarioParams>) -> ApiResult<Vec<ScenarioValue>> {
    let carbon: f64 = parse_param("carbon", params.carbon.as_deref())?
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "carbon is required"))?;
    let factor = parse_param("factor", params.factor.as_deref())?.unwrap_or(CO2_PER_CARBON);
    if !carbon.is_finite() || !factor.is_finite() {
        return Err(api_error(StatusCode::BAD_REQUEST, "carbon and factor must be finite"));
    }
    let values = scenario_values(carbon, factor);
    if values.iter().any(|v| !v.value_usd_per_ha.is_finite()) {
        return Err(api_error(StatusCode::BAD_REQUEST, "carbon value out of range"));
    }
    Ok(Json(values))
}

#[derive(Debug, Default, Deserialize)]
pub struct LayerParams {
    pub year: Option<String>,
    pub mode: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Legend {
    LandCover(Vec<LegendEntry>),
    CarbonStock(CarbonLegend),
}

#[derive(Debug, Serialize)]
pub struct LayersResponse {
    pub admin: AdminPlan,
    pub thematic: LayerPlan,
    pub legend: Legend,
}

pub async fn layer_plan(
    State(state): State<AppState>,
    Query(params): Query<LayerParams>,
) -> ApiResult<LayersResponse> {
    let year = year_or(params.year.as_deref(), &state.config.latest_year);
    let mode = match params.mode.as_deref() {
        None => ViewMode::default(),
        Some(raw) => ViewMode::parse(raw).ok_or_else(|| {
            api_error(StatusCode::BAD_REQUEST, format!("unknown view mode: {raw}"))
        })?,
    };
    let legend = match mode {
        ViewMode::LandCover => Legend::LandCover(land_cover_legend()),
        ViewMode::CarbonStock => Legend::CarbonStock(carbon_legend()),
    };
    Ok(Json(LayersResponse {
        admin: AdminPlan::new(
            state.config.public_data_url.clone(),
            state.config.schema.key_property.clone(),
        ),
        thematic: LayerPlan::for_selection(&year, mode, &state.config.endpoints),
        legend,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use formats::{load_lookup_from_str, BoundarySchema};
    use pretty_assertions::assert_eq;

    const DATASET: &str = include_str!("../../../../data/admin_boundaries.geojson");

    fn config() -> ServerConfig {
        ServerConfig::from_lookup(|_| None).unwrap()
    }

    fn ready_state() -> AppState {
        let lookup = load_lookup_from_str(DATASET, &BoundarySchema::default()).unwrap();
        AppState::new(config(), Arc::new(DatasetHandle::ready(lookup)))
    }

    fn loading_state() -> AppState {
        AppState::new(config(), Arc::new(DatasetHandle::new()))
    }

    #[tokio::test]
    async fn status_reports_load_state() {
        let Json(resp) = status(State(loading_state())).await;
        assert_eq!(resp.status, "loading");
        assert_eq!(resp.regions, 0);

        let Json(resp) = status(State(ready_state())).await;
        assert_eq!(resp.status, "ready");
        assert_eq!(resp.regions, 5);
        assert_eq!(resp.skipped, 1);
    }

    #[tokio::test]
    async fn summary_waits_for_dataset() {
        let err = summary(State(loading_state()), Query(SummaryParams::default()))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.1 .0, json!({ "status": "loading" }));
    }

    #[tokio::test]
    async fn summary_over_bundled_dataset() {
        let Json(resp) = summary(State(ready_state()), Query(SummaryParams::default()))
            .await
            .unwrap();
        assert_eq!(resp.summary.latest_year, "2025");
        assert_eq!(resp.summary.yearly_averages.len(), 6);
        // measured years then one forecast point
        assert_eq!(resp.trend.points.len(), 7);
        assert_eq!(resp.trend.forecast().map(|p| p.year.as_str()), Some("2026"));
        let top: Vec<_> = resp.ranking.iter().map(|b| b.region.as_str()).collect();
        assert_eq!(top.first(), Some(&"Aceh Tengah"));
        assert_eq!(resp.ranking[0].percent_of_max, 100.0);
    }

    #[tokio::test]
    async fn summary_rejects_bad_params() {
        let params = SummaryParams {
            top: Some("many".to_string()),
            ..Default::default()
        };
        let err = summary(State(ready_state()), Query(params)).await.unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);

        let params = SummaryParams {
            years: Some(",".to_string()),
            ..Default::default()
        };
        let err = summary(State(ready_state()), Query(params)).await.unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn top_limits_and_orders() {
        let params = TopParams {
            year: Some("2025".to_string()),
            limit: Some("2".to_string()),
        };
        let Json(bars) = top(State(ready_state()), Query(params)).await.unwrap();
        let names: Vec<_> = bars.iter().map(|b| b.region.as_str()).collect();
        assert_eq!(names, vec!["Aceh Tengah", "Deli Serdang"]);
        assert_eq!(bars[1].rank, 2);
    }

    #[tokio::test]
    async fn region_found_and_missing() {
        let Json(panel) = region(
            State(ready_state()),
            Path("Deli Serdang".to_string()),
            Query(RegionParams {
                year: Some("2025".to_string()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(panel.current_value, "136.75 tC/ha");
        assert!(panel.valuation.is_some());

        let err = region(
            State(ready_state()),
            Path("Atlantis".to_string()),
            Query(RegionParams::default()),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn scenarios_need_carbon() {
        let err = scenarios(Query(ScenarioParams::default())).await.unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);

        let Json(values) = scenarios(Query(ScenarioParams {
            carbon: Some("10".to_string()),
            factor: None,
        }))
        .await
        .unwrap();
        assert_eq!(values.len(), 4);
        assert!((values[1].value_usd_per_ha - 550.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn scenarios_reject_overflowing_values() {
        let err = scenarios(Query(ScenarioParams {
            carbon: Some("1e308".to_string()),
            factor: None,
        }))
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn summary_growth_card_matches_year_range() {
        let params = SummaryParams {
            latest: Some("2022".to_string()),
            ..Default::default()
        };
        let Json(resp) = summary(State(ready_state()), Query(params)).await.unwrap();
        assert_eq!(resp.summary.latest_year, "2022");
        assert_eq!(resp.cards[0].title, "Average Carbon Stock (2022)");
        assert_eq!(resp.cards[1].title, "Growth (2020-2025)");
    }

    #[tokio::test]
    async fn layers_follow_mode() {
        let Json(resp) = layer_plan(
            State(loading_state()),
            Query(LayerParams {
                year: Some("2023".to_string()),
                mode: Some("carbon_stock".to_string()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(resp.thematic.mode, ViewMode::CarbonStock);
        assert!(resp.thematic.source.urls[0].contains("/2023/"));
        assert!(matches!(resp.legend, Legend::CarbonStock(_)));

        let err = layer_plan(
            State(loading_state()),
            Query(LayerParams {
                year: None,
                mode: Some("satellite".to_string()),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }
}
