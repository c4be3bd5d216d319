// tests/access_control.rs
//
// Testes de integração do núcleo de autorização contra um Postgres real.
// Rodam com `cargo test -- --ignored` e exigem DATABASE_URL apontando
// para um banco descartável (as migrações são aplicadas na primeira
// conexão). Cada teste cria seus próprios usuários e fabricantes, com
// e-mails únicos, para poder rodar lado a lado com os demais.

use garantia_backend::{
    db::{
        CatalogRepository, InventoryRepository, ManufacturerRepository, RepresentativeRepository,
        UserRepository,
    },
    models::{auth::Role, manufacturer::ManufacturerStatus},
    services::access_service::AccessService,
};
use sqlx::PgPool;
use uuid::Uuid;

struct TestContext {
    pool: PgPool,
    users: UserRepository,
    manufacturers: ManufacturerRepository,
    catalog: CatalogRepository,
    inventory: InventoryRepository,
    representatives: RepresentativeRepository,
    access: AccessService,
}

async fn test_context() -> TestContext {
    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL deve apontar para um banco de teste");
    let pool = PgPool::connect(&database_url)
        .await
        .expect("falha ao conectar no banco de teste");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("falha ao migrar o banco de teste");

    let users = UserRepository::new(pool.clone());
    let manufacturers = ManufacturerRepository::new(pool.clone());
    let catalog = CatalogRepository::new(pool.clone());
    let inventory = InventoryRepository::new(pool.clone());
    let representatives = RepresentativeRepository::new(pool.clone());
    let access = AccessService::new(
        manufacturers.clone(),
        catalog.clone(),
        representatives.clone(),
    );

    TestContext {
        pool,
        users,
        manufacturers,
        catalog,
        inventory,
        representatives,
        access,
    }
}

impl TestContext {
    async fn new_user(&self, roles: &[Role]) -> Uuid {
        let email = format!("{}@teste.dev", Uuid::new_v4());
        let user = self
            .users
            .create_user(&self.pool, &email, "hash-de-teste", "Usuário de Teste", roles)
            .await
            .expect("falha ao criar usuário de teste");
        user.id
    }

    async fn new_manufacturer(&self, legal_representative: Uuid) -> Uuid {
        let manufacturer = self
            .manufacturers
            .create(&self.pool, legal_representative, "Fabricante de Teste", None)
            .await
            .expect("falha ao criar fabricante de teste");
        manufacturer.id
    }
}

// O apoderado alcança um produto do fabricante mesmo sem ser
// o dono direto do registro.
#[tokio::test]
#[ignore = "requer um Postgres em DATABASE_URL"]
async fn legal_representative_reaches_product_owned_by_someone_else() {
    let ctx = test_context().await;

    let apoderado = ctx.new_user(&[Role::Apoderado]).await;
    let outro_dono = ctx.new_user(&[Role::Apoderado]).await;
    let fabricante = ctx.new_manufacturer(apoderado).await;

    let produto = ctx
        .catalog
        .create_product(
            &ctx.pool,
            outro_dono,
            Some(fabricante),
            None,
            "Geladeira X",
            None,
            12,
            None,
        )
        .await
        .unwrap();

    assert!(
        ctx.access
            .can_access_product(apoderado, &produto)
            .await
            .unwrap()
    );
}

// Delegado ganha acesso ao ser incluído, e perde na primeira
// chamada depois de removido, sem nenhum cache no meio.
#[tokio::test]
#[ignore = "requer um Postgres em DATABASE_URL"]
async fn delegate_access_follows_live_delegation_state() {
    let ctx = test_context().await;

    let apoderado = ctx.new_user(&[Role::Apoderado]).await;
    let delegado = ctx.new_user(&[Role::UsuarioBienes]).await;
    let fabricante = ctx.new_manufacturer(apoderado).await;

    let produto = ctx
        .catalog
        .create_product(
            &ctx.pool,
            apoderado,
            Some(fabricante),
            None,
            "Fogão Y",
            None,
            24,
            None,
        )
        .await
        .unwrap();

    // Antes da delegação: negado.
    assert!(
        !ctx.access
            .can_access_product(delegado, &produto)
            .await
            .unwrap()
    );

    ctx.manufacturers
        .add_delegate(&ctx.pool, fabricante, delegado)
        .await
        .unwrap();
    assert!(
        ctx.access
            .can_access_product(delegado, &produto)
            .await
            .unwrap()
    );

    ctx.manufacturers
        .remove_delegate(&ctx.pool, fabricante, delegado)
        .await
        .unwrap();
    assert!(
        !ctx.access
            .can_access_product(delegado, &produto)
            .await
            .unwrap()
    );
}

// Dois saltos negados para quem não tem posse nem escopo.
#[tokio::test]
#[ignore = "requer um Postgres em DATABASE_URL"]
async fn stranger_cannot_reach_inventory_item_through_product() {
    let ctx = test_context().await;

    let apoderado = ctx.new_user(&[Role::Apoderado]).await;
    let comprador = ctx.new_user(&[Role::UsuarioBienes]).await;
    let estranho = ctx.new_user(&[Role::UsuarioBienes]).await;
    let fabricante = ctx.new_manufacturer(apoderado).await;

    let produto = ctx
        .catalog
        .create_product(
            &ctx.pool,
            apoderado,
            Some(fabricante),
            None,
            "Micro-ondas Z",
            None,
            12,
            None,
        )
        .await
        .unwrap();

    let item = ctx
        .inventory
        .create_item(
            &ctx.pool,
            comprador,
            Some(produto.id),
            None,
            Some("SN-001"),
            None,
            None,
            None,
        )
        .await
        .unwrap();

    // O estranho não alcança; o apoderado alcança pelos dois saltos.
    assert!(
        !ctx.access
            .can_access_inventory_item(estranho, &item)
            .await
            .unwrap()
    );
    assert!(
        ctx.access
            .can_access_inventory_item(apoderado, &item)
            .await
            .unwrap()
    );
}

// Delegado alcança o representante através de uma marca do
// fabricante, sem ser dono de nenhum dos dois.
#[tokio::test]
#[ignore = "requer um Postgres em DATABASE_URL"]
async fn delegate_reaches_representative_through_brand() {
    let ctx = test_context().await;

    let apoderado = ctx.new_user(&[Role::Apoderado]).await;
    let delegado = ctx.new_user(&[Role::UsuarioBienes]).await;
    let fabricante = ctx.new_manufacturer(apoderado).await;
    ctx.manufacturers
        .add_delegate(&ctx.pool, fabricante, delegado)
        .await
        .unwrap();

    let marca = ctx
        .catalog
        .create_brand(&ctx.pool, apoderado, Some(fabricante), "Marca Norte")
        .await
        .unwrap();

    let representante = ctx
        .representatives
        .create(&ctx.pool, apoderado, "Rep Sul", None, None)
        .await
        .unwrap();
    ctx.representatives
        .add_brand(&ctx.pool, representante.id, marca.id)
        .await
        .unwrap();

    assert!(
        ctx.access
            .can_access_representative(delegado, &representante)
            .await
            .unwrap()
    );
}

// Simetria do escopo: um fabricante está no escopo exatamente
// quando o usuário é apoderado ou delegado dele.
#[tokio::test]
#[ignore = "requer um Postgres em DATABASE_URL"]
async fn tenant_scope_mirrors_ownership_and_delegation() {
    let ctx = test_context().await;

    let apoderado = ctx.new_user(&[Role::Apoderado]).await;
    let delegado = ctx.new_user(&[Role::UsuarioBienes]).await;
    let fora = ctx.new_user(&[Role::Apoderado]).await;

    let proprio = ctx.new_manufacturer(apoderado).await;
    let delegante = ctx.new_manufacturer(fora).await;
    ctx.manufacturers
        .add_delegate(&ctx.pool, delegante, delegado)
        .await
        .unwrap();

    let escopo_apoderado = ctx.manufacturers.tenant_scope(apoderado).await.unwrap();
    assert!(escopo_apoderado.contains(&proprio));
    assert!(!escopo_apoderado.contains(&delegante));

    let escopo_delegado = ctx.manufacturers.tenant_scope(delegado).await.unwrap();
    assert!(escopo_delegado.contains(&delegante));
    assert!(!escopo_delegado.contains(&proprio));
}

// A variante estreita do resolvedor respeita o status do fabricante.
#[tokio::test]
#[ignore = "requer um Postgres em DATABASE_URL"]
async fn narrow_scope_filters_by_manufacturer_status() {
    let ctx = test_context().await;

    let apoderado = ctx.new_user(&[Role::Apoderado]).await;
    let ativo = ctx.new_manufacturer(apoderado).await;
    let suspenso = ctx.new_manufacturer(apoderado).await;

    ctx.manufacturers
        .update(
            &ctx.pool,
            suspenso,
            None,
            None,
            Some(ManufacturerStatus::Suspended),
        )
        .await
        .unwrap();

    let escopo = ctx
        .manufacturers
        .tenant_scope_with_status(apoderado, ManufacturerStatus::Active)
        .await
        .unwrap();
    assert!(escopo.contains(&ativo));
    assert!(!escopo.contains(&suspenso));

    // O escopo cheio continua com os dois.
    let escopo_cheio = ctx.manufacturers.tenant_scope(apoderado).await.unwrap();
    assert!(escopo_cheio.contains(&ativo) && escopo_cheio.contains(&suspenso));
}

// A listagem e o predicado pontual nunca podem discordar.
#[tokio::test]
#[ignore = "requer um Postgres em DATABASE_URL"]
async fn list_filter_agrees_with_point_predicate() {
    let ctx = test_context().await;

    let observador = ctx.new_user(&[Role::Apoderado]).await;
    let vizinho = ctx.new_user(&[Role::Apoderado]).await;

    let meu_fabricante = ctx.new_manufacturer(observador).await;
    let fabricante_alheio = ctx.new_manufacturer(vizinho).await;

    // Universo: produto próprio sem fabricante, produto do meu tenant
    // criado por outro, produto alheio, produto órfão de outro dono.
    let universo = vec![
        ctx.catalog
            .create_product(&ctx.pool, observador, None, None, "Meu avulso", None, 12, None)
            .await
            .unwrap(),
        ctx.catalog
            .create_product(
                &ctx.pool,
                vizinho,
                Some(meu_fabricante),
                None,
                "Do meu tenant",
                None,
                12,
                None,
            )
            .await
            .unwrap(),
        ctx.catalog
            .create_product(
                &ctx.pool,
                vizinho,
                Some(fabricante_alheio),
                None,
                "Alheio",
                None,
                12,
                None,
            )
            .await
            .unwrap(),
        ctx.catalog
            .create_product(&ctx.pool, vizinho, None, None, "Órfão alheio", None, 12, None)
            .await
            .unwrap(),
    ];

    let escopo = ctx.manufacturers.tenant_scope(observador).await.unwrap();
    let listados: Vec<Uuid> = ctx
        .catalog
        .list_visible_products(observador, &escopo, None, None)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();

    // Força bruta: o predicado decide produto a produto, e o resultado
    // tem de bater com a presença na listagem.
    for produto in &universo {
        let pelo_predicado = ctx
            .access
            .can_access_product(observador, produto)
            .await
            .unwrap();
        let pela_listagem = listados.contains(&produto.id);
        assert_eq!(
            pelo_predicado, pela_listagem,
            "listagem e predicado discordam para o produto {}",
            produto.name
        );
    }
}

// Busca estreita o conjunto visível, nunca o alarga.
#[tokio::test]
#[ignore = "requer um Postgres em DATABASE_URL"]
async fn search_filter_never_widens_visibility() {
    let ctx = test_context().await;

    let observador = ctx.new_user(&[Role::Apoderado]).await;
    let fabricante = ctx.new_manufacturer(observador).await;

    for nome in ["Lavadora Alfa", "Lavadora Beta", "Secadora Gama"] {
        ctx.catalog
            .create_product(
                &ctx.pool,
                observador,
                Some(fabricante),
                None,
                nome,
                None,
                12,
                None,
            )
            .await
            .unwrap();
    }

    let escopo = ctx.manufacturers.tenant_scope(observador).await.unwrap();
    let sem_filtro: Vec<Uuid> = ctx
        .catalog
        .list_visible_products(observador, &escopo, None, None)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();

    let com_filtro = ctx
        .catalog
        .list_visible_products(observador, &escopo, Some("Lavadora"), None)
        .await
        .unwrap();

    assert_eq!(com_filtro.len(), 2);
    for produto in com_filtro {
        assert!(sem_filtro.contains(&produto.id));
    }
}

// Fail closed: item cujo produto não tem fabricante não abre caminho
// para ninguém além do dono.
#[tokio::test]
#[ignore = "requer um Postgres em DATABASE_URL"]
async fn unresolved_manufacturer_link_denies_access() {
    let ctx = test_context().await;

    let comprador = ctx.new_user(&[Role::UsuarioBienes]).await;
    let apoderado = ctx.new_user(&[Role::Apoderado]).await;
    let _fabricante = ctx.new_manufacturer(apoderado).await;

    // Produto órfão (sem fabricante) de um terceiro.
    let dono_produto = ctx.new_user(&[Role::Apoderado]).await;
    let produto = ctx
        .catalog
        .create_product(&ctx.pool, dono_produto, None, None, "Sem tenant", None, 12, None)
        .await
        .unwrap();

    let item = ctx
        .inventory
        .create_item(
            &ctx.pool,
            comprador,
            Some(produto.id),
            None,
            None,
            None,
            None,
            None,
        )
        .await
        .unwrap();

    // O dono continua alcançando; o apoderado (escopo não-vazio) não.
    assert!(
        ctx.access
            .can_access_inventory_item(comprador, &item)
            .await
            .unwrap()
    );
    assert!(
        !ctx.access
            .can_access_inventory_item(apoderado, &item)
            .await
            .unwrap()
    );
}

// O dono alcança o recurso mesmo com escopo vazio.
#[tokio::test]
#[ignore = "requer um Postgres em DATABASE_URL"]
async fn owner_with_empty_scope_still_has_access() {
    let ctx = test_context().await;

    let usuario = ctx.new_user(&[Role::UsuarioBienes]).await;
    assert!(ctx.manufacturers.tenant_scope(usuario).await.unwrap().is_empty());

    let marca = ctx
        .catalog
        .create_brand(&ctx.pool, usuario, None, "Marca Solo")
        .await
        .unwrap();

    assert!(ctx.access.can_access_brand(usuario, &marca).await.unwrap());
}
