use compute::RegionCarbon;
use foundation::round2;
use serde::Serialize;

/// A row of the ranked list; `percent_of_max` drives the bar width.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingBar {
    pub rank: usize,
    pub region: String,
    pub carbon: f64,
    pub percent_of_max: f64,
}

pub fn ranking_bars(ranked: &[RegionCarbon]) -> Vec<RankingBar> {
    let max = ranked.first().map(|r| r.carbon).unwrap_or(0.0);
    ranked
        .iter()
        .enumerate()
        .map(|(i, r)| RankingBar {
            rank: i + 1,
            region: r.region.clone(),
            carbon: round2(r.carbon),
            percent_of_max: foundation::checked_ratio(r.carbon, max)
                .map(|p| round2(p * 100.0))
                .unwrap_or(0.0),
        })
        .collect()
}
