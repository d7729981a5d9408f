//! AWS Cost Explorer source backed by the `aws` CLI.

use async_trait::async_trait;
use billscope_core::CostRecord;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::context::FetchContext;
use crate::error::FetchError;
use crate::parser::{parse_cost_response, CostPage};
use crate::query::CostQuery;
use crate::source::CostSource;

/// Upper bound on followed `NextPageToken`s for a single query.
const MAX_PAGES: usize = 20;

/// Queries `aws ce get-cost-and-usage`.
#[derive(Debug, Clone)]
pub struct AwsCostExplorer {
    ctx: Arc<FetchContext>,
}

impl AwsCostExplorer {
    /// Creates a source using the given context.
    pub fn new(ctx: Arc<FetchContext>) -> Self {
        Self { ctx }
    }

    /// Returns true if the CLI can be found on PATH.
    pub fn is_available(&self) -> bool {
        self.ctx.process.command_exists(&self.ctx.settings.command)
    }

    /// Full argument list for one page of `query`.
    pub fn build_args(&self, query: &CostQuery, page_token: Option<&str>) -> Vec<String> {
        let settings = &self.ctx.settings;
        let mut args = query.to_cli_args();
        args.extend(["--output".to_string(), "json".to_string()]);

        if let Some(profile) = &settings.profile {
            args.extend(["--profile".to_string(), profile.clone()]);
        }
        if let Some(region) = &settings.region {
            args.extend(["--region".to_string(), region.clone()]);
        }
        if let Some(token) = page_token {
            args.extend(["--next-page-token".to_string(), token.to_string()]);
        }

        args
    }

    /// Runs the CLI for one page of `query`.
    async fn fetch_page(
        &self,
        query: &CostQuery,
        page_token: Option<String>,
    ) -> Result<CostPage, FetchError> {
        let settings = &self.ctx.settings;
        let args = self.build_args(query, page_token.as_deref());
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();

        // The pager would otherwise wrap output on interactive terminals.
        let output = self
            .ctx
            .process
            .run(
                &settings.command,
                &arg_refs,
                &[("AWS_PAGER", "")],
                settings.timeout,
            )
            .await?;

        let page = parse_cost_response(output.stdout_if_success()?, query)?;
        if page.estimated {
            debug!("Cost figures are still estimated");
        }
        Ok(page)
    }
}

/// Follows page tokens until a page has none.
///
/// Still holding a token after `max_pages` pages is an error: a partial sum
/// would pass for the period's real cost.
async fn collect_pages<F, Fut>(
    max_pages: usize,
    mut fetch_page: F,
) -> Result<Vec<CostRecord>, FetchError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<CostPage, FetchError>>,
{
    let mut records = Vec::new();
    let mut page_token = None;

    for page_number in 1..=max_pages {
        let page = fetch_page(page_token.take()).await?;
        records.extend(page.records);
        debug!(page = page_number, total = records.len(), "Fetched cost page");

        match page.next_page_token {
            Some(token) => page_token = Some(token),
            None => return Ok(records),
        }
    }

    warn!(pages = max_pages, "Result still paginated after page limit");
    Err(FetchError::InvalidResponse(format!("more than {max_pages} result pages")))
}

#[async_trait]
impl CostSource for AwsCostExplorer {
    fn id(&self) -> &str {
        "aws.ce"
    }

    #[instrument(skip(self, query), fields(period = %query.period.label))]
    async fn query(&self, query: &CostQuery) -> Result<Vec<CostRecord>, FetchError> {
        collect_pages(MAX_PAGES, |token| self.fetch_page(query, token)).await
    }
}
