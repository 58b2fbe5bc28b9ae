use async_graphql::{EmptySubscription, ErrorExtensions, MergedObject, Schema, http::GraphiQLSource};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{Extension, Router, response::Html, routing::get};

use crate::modules::billing::use_cases::generate_invoice::inbound::graphql::InvoiceQueryRoot;
use crate::modules::time_entries::use_cases::log_time::inbound::graphql::LogTimeMutationRoot;
use crate::modules::time_entries::use_cases::project_summary::inbound::graphql::ProjectSummaryQueryRoot;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::identity::Caller;
pub use crate::shell::state::AppState;

pub const GRAPHQL_PATH: &str = "/graphql";

#[derive(MergedObject, Default)]
pub struct QueryRoot(ProjectSummaryQueryRoot, InvoiceQueryRoot);

#[derive(MergedObject, Default)]
pub struct MutationRoot(LogTimeMutationRoot);

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

impl ErrorExtensions for ApplicationError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string())
            .extend_with(|_, extensions| extensions.set("exc_type", self.kind()))
    }
}

pub fn build_schema(state: AppState) -> AppSchema {
    Schema::build(QueryRoot::default(), MutationRoot::default(), EmptySubscription)
        .data(state)
        .finish()
}

pub fn router(schema: AppSchema) -> Router {
    Router::new()
        .route(GRAPHQL_PATH, get(graphiql).post(graphql))
        .layer(Extension(schema))
}

async fn graphql(
    Extension(schema): Extension<AppSchema>,
    caller: Caller,
    request: GraphQLRequest,
) -> GraphQLResponse {
    schema.execute(request.into_inner().data(caller)).await.into()
}

async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}
