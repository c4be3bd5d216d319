// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Users (admin) ---
        handlers::users::list_users,
        handlers::users::create_user,
        handlers::users::update_roles,

        // --- Manufacturers ---
        handlers::manufacturers::create_manufacturer,
        handlers::manufacturers::list_manufacturers,
        handlers::manufacturers::get_manufacturer,
        handlers::manufacturers::update_manufacturer,
        handlers::manufacturers::delete_manufacturer,
        handlers::manufacturers::list_delegates,
        handlers::manufacturers::add_delegate,
        handlers::manufacturers::remove_delegate,

        // --- Brands ---
        handlers::brands::create_brand,
        handlers::brands::list_brands,
        handlers::brands::get_brand,
        handlers::brands::update_brand,
        handlers::brands::delete_brand,

        // --- Products ---
        handlers::products::create_product,
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::products::update_product,
        handlers::products::delete_product,

        // --- Parts ---
        handlers::parts::create_part,
        handlers::parts::list_parts,
        handlers::parts::get_part,
        handlers::parts::update_part,
        handlers::parts::delete_part,

        // --- Inventory ---
        handlers::inventory::create_item,
        handlers::inventory::list_items,
        handlers::inventory::get_item,
        handlers::inventory::update_item,
        handlers::inventory::delete_item,

        // --- Warranties ---
        handlers::warranties::create_warranty,
        handlers::warranties::list_warranties,
        handlers::warranties::get_warranty,
        handlers::warranties::update_warranty,
        handlers::warranties::set_warranty_status,
        handlers::warranties::delete_warranty,

        // --- Representatives ---
        handlers::representatives::create_representative,
        handlers::representatives::list_representatives,
        handlers::representatives::get_representative,
        handlers::representatives::update_representative,
        handlers::representatives::delete_representative,
        handlers::representatives::list_represented_brands,
        handlers::representatives::add_represented_brand,
        handlers::representatives::remove_represented_brand,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Manufacturers ---
            models::manufacturer::ManufacturerStatus,
            models::manufacturer::Manufacturer,
            models::manufacturer::ManufacturerDelegate,

            // --- Catalog ---
            models::catalog::Brand,
            models::catalog::Product,
            models::catalog::Part,

            // --- Inventory ---
            models::inventory::InventoryItem,

            // --- Warranties ---
            models::warranty::WarrantyStatus,
            models::warranty::Warranty,

            // --- Representatives ---
            models::representative::Representative,

            // --- Payloads ---
            handlers::users::CreateUserPayload,
            handlers::users::UpdateRolesPayload,
            handlers::manufacturers::CreateManufacturerPayload,
            handlers::manufacturers::UpdateManufacturerPayload,
            handlers::manufacturers::AddDelegatePayload,
            handlers::brands::CreateBrandPayload,
            handlers::brands::UpdateBrandPayload,
            handlers::products::CreateProductPayload,
            handlers::products::UpdateProductPayload,
            handlers::parts::CreatePartPayload,
            handlers::parts::UpdatePartPayload,
            handlers::inventory::CreateItemPayload,
            handlers::inventory::UpdateItemPayload,
            handlers::warranties::CreateWarrantyPayload,
            handlers::warranties::UpdateWarrantyPayload,
            handlers::warranties::SetStatusPayload,
            handlers::representatives::CreateRepresentativePayload,
            handlers::representatives::UpdateRepresentativePayload,
            handlers::representatives::AddBrandPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Users", description = "Dados do Usuário e Administração de Papéis"),
        (name = "Manufacturers", description = "Fabricantes (tenants) e Delegados"),
        (name = "Brands", description = "Marcas do Catálogo"),
        (name = "Products", description = "Produtos do Catálogo"),
        (name = "Parts", description = "Peças de Reposição"),
        (name = "Inventory", description = "Bens Registrados pelos Usuários"),
        (name = "Warranties", description = "Solicitações de Garantia"),
        (name = "Representatives", description = "Representantes Comerciais")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
