//! Pipeline orchestration: resolve endpoints, retrieve alternatives,
//! enrich with air quality, rank.

use crate::config::{Config, MAX_ALTERNATIVES, ROUTE_SAMPLE_POINTS};
use crate::resolver::{PlaceResolver, ResolveError};
use crate::retriever::RouteRetriever;
use crate::sampler::AirQualitySampler;
use chrono::Utc;
use cleanroute_core::{rank_routes, Coordinate, RouteCandidate, RoutePlan, TravelMode};
use futures::future::join_all;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("start location not found: {0}")]
    StartNotFound(String),
    #[error("end location not found: {0}")]
    EndNotFound(String),
}

/// Composition root of the pipeline. Owns the resolver, retriever, and
/// sampler, each with its own expiring cache.
pub struct RoutePlanner {
    resolver: PlaceResolver,
    retriever: RouteRetriever,
    sampler: AirQualitySampler,
}

impl RoutePlanner {
    pub fn new(config: &Config) -> Self {
        Self {
            resolver: PlaceResolver::new(config),
            retriever: RouteRetriever::new(config),
            sampler: AirQualitySampler::new(config),
        }
    }

    /// The underlying resolver, for one-off place lookups.
    pub fn resolver(&self) -> &PlaceResolver {
        &self.resolver
    }

    /// Fastest alternatives ranked by travel time only; air-quality fields
    /// stay empty for a later enrichment pass.
    pub async fn fast_routes(
        &self,
        start: &str,
        end: &str,
        mode: TravelMode,
    ) -> Result<RoutePlan, PlanError> {
        let (start_coord, end_coord) = self.resolve_endpoints(start, end).await?;
        let candidates = self
            .retriever
            .get_routes(start_coord, end_coord, mode, true)
            .await;
        // Without quality data the combined ranker degrades to duration order.
        let routes = rank_routes(candidates, MAX_ALTERNATIVES);
        Ok(plan(start_coord, end_coord, routes))
    }

    /// Attach air-quality data to candidates and re-rank by the combined
    /// time/quality score. Candidates are enriched concurrently; each
    /// enrichment itself fans out over sampled points and segments.
    pub async fn enrich_routes(&self, candidates: Vec<RouteCandidate>) -> Vec<RouteCandidate> {
        let enriched = join_all(candidates.into_iter().map(|route| async move {
            let (summary, segments) = futures::join!(
                self.sampler.route_quality(&route.geometry, ROUTE_SAMPLE_POINTS),
                self.sampler.segment_qualities(&route.geometry),
            );
            route.with_quality(&summary, segments)
        }))
        .await;

        rank_routes(enriched, MAX_ALTERNATIVES)
    }

    /// Resolve, retrieve, enrich, and rank in one call.
    pub async fn full_route(
        &self,
        start: &str,
        end: &str,
        mode: TravelMode,
    ) -> Result<RoutePlan, PlanError> {
        let (start_coord, end_coord) = self.resolve_endpoints(start, end).await?;
        let candidates = self
            .retriever
            .get_routes(start_coord, end_coord, mode, true)
            .await;
        let routes = self.enrich_routes(candidates).await;
        Ok(plan(start_coord, end_coord, routes))
    }

    async fn resolve_endpoints(
        &self,
        start: &str,
        end: &str,
    ) -> Result<(Coordinate, Coordinate), PlanError> {
        let start_coord = self.resolver.resolve(start).await.map_err(|err| match err {
            ResolveError::NotFound { query } => PlanError::StartNotFound(query),
        })?;
        let end_coord = self.resolver.resolve(end).await.map_err(|err| match err {
            ResolveError::NotFound { query } => PlanError::EndNotFound(query),
        })?;
        Ok((start_coord, end_coord))
    }
}

fn plan(start: Coordinate, end: Coordinate, routes: Vec<RouteCandidate>) -> RoutePlan {
    RoutePlan {
        start,
        end,
        recommended_index: 0,
        routes,
        computed_at: Utc::now(),
    }
}
