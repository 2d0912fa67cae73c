use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(utoipa::ToSchema)]
pub struct CreateOrderInputDoc {
    pub product_id: Uuid,
    pub client_id: Uuid,
}

#[derive(utoipa::ToSchema)]
pub struct UpdateOrderInputDoc {
    pub product_id: Uuid,
    pub client_id: Uuid,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::orders::list,
        crate::routes::orders::create,
        crate::routes::orders::get,
        crate::routes::orders::update,
        crate::routes::orders::delete,
    ),
    components(
        schemas(
            HealthResponse,
            CreateOrderInputDoc,
            UpdateOrderInputDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "orders")
    )
)]
pub struct ApiDoc;
