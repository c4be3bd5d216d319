// src/main.rs

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use garantia_backend::config::AppState;
use garantia_backend::middleware::auth::auth_middleware;
use garantia_backend::{docs, handlers};

#[tokio::main]
async fn main() {
    // Inicializa o logger.
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Perfil + administração de usuários (o guardião AdminOnly roda
    // dentro dos handlers administrativos)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .route(
            "/",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route("/{id}/roles", put(handlers::users::update_roles))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    let manufacturer_routes = Router::new()
        .route(
            "/",
            post(handlers::manufacturers::create_manufacturer)
                .get(handlers::manufacturers::list_manufacturers),
        )
        .route(
            "/{id}",
            get(handlers::manufacturers::get_manufacturer)
                .put(handlers::manufacturers::update_manufacturer)
                .delete(handlers::manufacturers::delete_manufacturer),
        )
        .route(
            "/{id}/delegates",
            get(handlers::manufacturers::list_delegates)
                .post(handlers::manufacturers::add_delegate),
        )
        .route(
            "/{id}/delegates/{user_id}",
            delete(handlers::manufacturers::remove_delegate),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    let brand_routes = Router::new()
        .route(
            "/",
            post(handlers::brands::create_brand).get(handlers::brands::list_brands),
        )
        .route(
            "/{id}",
            get(handlers::brands::get_brand)
                .put(handlers::brands::update_brand)
                .delete(handlers::brands::delete_brand),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    let product_routes = Router::new()
        .route(
            "/",
            post(handlers::products::create_product).get(handlers::products::list_products),
        )
        .route(
            "/{id}",
            get(handlers::products::get_product)
                .put(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    let part_routes = Router::new()
        .route(
            "/",
            post(handlers::parts::create_part).get(handlers::parts::list_parts),
        )
        .route(
            "/{id}",
            get(handlers::parts::get_part)
                .put(handlers::parts::update_part)
                .delete(handlers::parts::delete_part),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    let inventory_routes = Router::new()
        .route(
            "/items",
            post(handlers::inventory::create_item).get(handlers::inventory::list_items),
        )
        .route(
            "/items/{id}",
            get(handlers::inventory::get_item)
                .put(handlers::inventory::update_item)
                .delete(handlers::inventory::delete_item),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    let warranty_routes = Router::new()
        .route(
            "/",
            post(handlers::warranties::create_warranty).get(handlers::warranties::list_warranties),
        )
        .route(
            "/{id}",
            get(handlers::warranties::get_warranty)
                .put(handlers::warranties::update_warranty)
                .delete(handlers::warranties::delete_warranty),
        )
        .route(
            "/{id}/status",
            put(handlers::warranties::set_warranty_status),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    let representative_routes = Router::new()
        .route(
            "/",
            post(handlers::representatives::create_representative)
                .get(handlers::representatives::list_representatives),
        )
        .route(
            "/{id}",
            get(handlers::representatives::get_representative)
                .put(handlers::representatives::update_representative)
                .delete(handlers::representatives::delete_representative),
        )
        .route(
            "/{id}/brands",
            get(handlers::representatives::list_represented_brands)
                .post(handlers::representatives::add_represented_brand),
        )
        .route(
            "/{id}/brands/{brand_id}",
            delete(handlers::representatives::remove_represented_brand),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/manufacturers", manufacturer_routes)
        .nest("/api/brands", brand_routes)
        .nest("/api/products", product_routes)
        .nest("/api/parts", part_routes)
        .nest("/api/inventory", inventory_routes)
        .nest("/api/warranties", warranty_routes)
        .nest("/api/representatives", representative_routes)
        .merge(
            SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        )
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
