//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{account_handler, order_handler};
use crate::domain::Order;

/// OpenAPI documentation for the shopcart API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "shopcart API",
        version = "0.1.0",
        description = "Minimal e-commerce backend: JWT-authenticated accounts and owner-scoped orders",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Account endpoints
        account_handler::register,
        account_handler::login,
        account_handler::get_username,
        // Order endpoints
        order_handler::list_orders,
        order_handler::get_order,
        order_handler::create_order,
        order_handler::delete_order,
    ),
    components(
        schemas(
            Order,
            account_handler::RegisterRequest,
            account_handler::LoginRequest,
            order_handler::CreateOrderRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Account", description = "Registration, login, and user lookup"),
        (name = "Orders", description = "Owner-scoped order operations")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/account/login"))
                        .build(),
                ),
            );
        }
    }
}
