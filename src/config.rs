// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{
        CatalogRepository, InventoryRepository, ManufacturerRepository, RepresentativeRepository,
        UserRepository, WarrantyRepository,
    },
    services::{
        access_service::AccessService, auth::AuthService, catalog_service::CatalogService,
        inventory_service::InventoryService, manufacturer_service::ManufacturerService,
        representative_service::RepresentativeService, user_service::UserService,
        warranty_service::WarrantyService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub manufacturer_service: ManufacturerService,
    pub catalog_service: CatalogService,
    pub inventory_service: InventoryService,
    pub warranty_service: WarrantyService,
    pub representative_service: RepresentativeService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let manufacturer_repo = ManufacturerRepository::new(db_pool.clone());
        let catalog_repo = CatalogRepository::new(db_pool.clone());
        let inventory_repo = InventoryRepository::new(db_pool.clone());
        let warranty_repo = WarrantyRepository::new(db_pool.clone());
        let representative_repo = RepresentativeRepository::new(db_pool.clone());

        // O serviço de acesso é compartilhado por todos os domínios:
        // é a fonte única das decisões de autorização.
        let access_service = AccessService::new(
            manufacturer_repo.clone(),
            catalog_repo.clone(),
            representative_repo.clone(),
        );

        let auth_service =
            AuthService::new(user_repo.clone(), jwt_secret.clone(), db_pool.clone());
        let user_service = UserService::new(user_repo.clone(), db_pool.clone());
        let manufacturer_service = ManufacturerService::new(
            manufacturer_repo.clone(),
            access_service.clone(),
            db_pool.clone(),
        );
        let catalog_service = CatalogService::new(
            catalog_repo.clone(),
            access_service.clone(),
            db_pool.clone(),
        );
        let inventory_service = InventoryService::new(
            inventory_repo.clone(),
            catalog_repo.clone(),
            access_service.clone(),
            db_pool.clone(),
        );
        let warranty_service = WarrantyService::new(
            warranty_repo,
            inventory_repo,
            manufacturer_repo,
            access_service.clone(),
            db_pool.clone(),
        );
        let representative_service = RepresentativeService::new(
            representative_repo,
            catalog_repo,
            access_service,
            db_pool.clone(),
        );

        Ok(Self {
            db_pool,
            jwt_secret,
            auth_service,
            user_service,
            manufacturer_service,
            catalog_service,
            inventory_service,
            warranty_service,
            representative_service,
        })
    }
}
