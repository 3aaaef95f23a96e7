use crate::GameAppData;
use crate::r#match::routes::match_routes;
use axum::Router;

pub struct ServerRoutes;

impl ServerRoutes {
    pub fn create() -> Router<GameAppData> {
        Router::<GameAppData>::new().merge(match_routes())
    }
}
