//! Tests for the cache-aside repository decorator.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use rstest::{fixture, rstest};
use serde_json::json;

use super::*;
use crate::domain::RecipeDraft;
use crate::domain::ports::{MockRecipeCache, RecipeCacheError};
use crate::outbound::cache::InMemoryRecipeCache;
use crate::outbound::persistence::InMemoryRecipeRepository;

/// Repository that counts reads before delegating to an in-memory store.
#[derive(Default)]
struct CountingRepository {
    inner: InMemoryRecipeRepository,
    get_all_calls: AtomicUsize,
    get_by_id_calls: AtomicUsize,
}

impl CountingRepository {
    fn get_all_calls(&self) -> usize {
        self.get_all_calls.load(Ordering::SeqCst)
    }

    fn get_by_id_calls(&self) -> usize {
        self.get_by_id_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecipeRepository for CountingRepository {
    async fn get_all(&self, ctx: &RequestContext) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        self.get_all_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get_all(ctx).await
    }

    async fn get_by_id(
        &self,
        ctx: &RequestContext,
        id: &RecipeId,
    ) -> Result<Recipe, RecipeRepositoryError> {
        self.get_by_id_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get_by_id(ctx, id).await
    }

    async fn add(&self, ctx: &RequestContext, recipe: &Recipe) -> Result<(), RecipeRepositoryError> {
        self.inner.add(ctx, recipe).await
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        recipe: &Recipe,
    ) -> Result<(), RecipeRepositoryError> {
        self.inner.update(ctx, recipe).await
    }

    async fn delete(
        &self,
        ctx: &RequestContext,
        recipe: &Recipe,
    ) -> Result<(), RecipeRepositoryError> {
        self.inner.delete(ctx, recipe).await
    }
}

type Decorated = CachedRecipeRepository<CountingRepository, InMemoryRecipeCache>;

struct Harness {
    repo: Arc<CountingRepository>,
    cache: Arc<InMemoryRecipeCache>,
    cached: Decorated,
    ctx: RequestContext,
}

#[fixture]
fn harness() -> Harness {
    let repo = Arc::new(CountingRepository::default());
    let cache = Arc::new(InMemoryRecipeCache::new());
    let cached = CachedRecipeRepository::new(
        Arc::clone(&repo),
        Arc::clone(&cache),
        CachePolicy::default(),
    );
    Harness {
        repo,
        cache,
        cached,
        ctx: RequestContext::new(),
    }
}

fn recipe(title: &str) -> Recipe {
    Recipe::create(RecipeDraft {
        title: title.to_owned(),
        description: "Easy".to_owned(),
        preparation_time: 10,
        cooking_time: 20,
        servings: 4,
        ingredients: vec!["Eggs".to_owned(), "Flour".to_owned()],
        instructions: vec!["Mix".to_owned(), "Bake".to_owned()],
    })
    .expect("valid recipe")
}

#[rstest]
#[tokio::test]
async fn get_all_is_served_from_cache_after_first_read(harness: Harness) {
    let Harness {
        repo, cached, ctx, ..
    } = harness;
    repo.inner.add(&ctx, &recipe("Soup")).await.expect("seeded");

    let first = cached.get_all(&ctx).await.expect("listed");
    let second = cached.get_all(&ctx).await.expect("listed");

    assert_eq!(first, second);
    assert_eq!(second.len(), 1);
    assert_eq!(repo.get_all_calls(), 1);
}

#[rstest]
#[tokio::test]
async fn get_by_id_is_served_from_cache_after_first_read(harness: Harness) {
    let Harness {
        repo, cached, ctx, ..
    } = harness;
    let soup = recipe("Soup");
    repo.inner.add(&ctx, &soup).await.expect("seeded");

    for _ in 0..3 {
        let found = cached.get_by_id(&ctx, soup.id()).await.expect("present");
        assert_eq!(found.title(), "Soup");
    }
    assert_eq!(repo.get_by_id_calls(), 1);
}

#[rstest]
#[tokio::test]
async fn missing_recipe_is_not_cached(harness: Harness) {
    let Harness {
        repo,
        cache,
        cached,
        ctx,
    } = harness;
    let id = RecipeId::random();

    for _ in 0..2 {
        let err = cached.get_by_id(&ctx, &id).await.expect_err("missing");
        assert_eq!(err, RecipeRepositoryError::not_found(id));
    }
    assert_eq!(repo.get_by_id_calls(), 2);
    assert!(cache.is_empty());
}

#[rstest]
#[tokio::test]
async fn add_invalidates_list_and_populates_item(harness: Harness) {
    let Harness {
        repo, cached, ctx, ..
    } = harness;
    assert!(cached.get_all(&ctx).await.expect("listed").is_empty());

    let soup = recipe("Soup");
    cached.add(&ctx, &soup).await.expect("stored");

    let listed = cached.get_all(&ctx).await.expect("listed");
    assert_eq!(listed, [soup.clone()]);
    assert_eq!(repo.get_all_calls(), 2);

    let found = cached.get_by_id(&ctx, soup.id()).await.expect("present");
    assert_eq!(found.title(), "Soup");
    assert_eq!(repo.get_by_id_calls(), 0);
}

#[rstest]
#[tokio::test]
async fn update_invalidates_cached_entries(harness: Harness) {
    let Harness {
        repo, cached, ctx, ..
    } = harness;
    let mut soup = recipe("Soup");
    cached.add(&ctx, &soup).await.expect("stored");
    cached.get_all(&ctx).await.expect("listed");

    soup.update(RecipeDraft {
        title: "Stew".to_owned(),
        ..soup.to_draft()
    })
    .expect("valid update");
    cached.update(&ctx, &soup).await.expect("updated");

    let found = cached.get_by_id(&ctx, soup.id()).await.expect("present");
    assert_eq!(found.title(), "Stew");
    let listed = cached.get_all(&ctx).await.expect("listed");
    assert_eq!(listed.first().map(Recipe::title), Some("Stew"));
    assert_eq!(repo.get_by_id_calls(), 1);
    assert_eq!(repo.get_all_calls(), 2);
}

#[rstest]
#[tokio::test]
async fn delete_invalidates_cached_entries(harness: Harness) {
    let Harness {
        repo,
        cache,
        cached,
        ctx,
    } = harness;
    let soup = recipe("Soup");
    cached.add(&ctx, &soup).await.expect("stored");
    cached.get_all(&ctx).await.expect("listed");

    cached.delete(&ctx, &soup).await.expect("deleted");

    assert!(cache.is_empty());
    assert!(cached.get_all(&ctx).await.expect("listed").is_empty());
    assert!(cached.get_by_id(&ctx, soup.id()).await.is_err());
    assert_eq!(repo.get_by_id_calls(), 1);
}

#[rstest]
#[tokio::test]
async fn failed_write_leaves_cache_untouched(harness: Harness) {
    let Harness {
        cache, cached, ctx, ..
    } = harness;
    let ghost = recipe("Ghost");
    cached.get_all(&ctx).await.expect("listed");

    let err = cached.update(&ctx, &ghost).await.expect_err("missing");

    assert_eq!(err, RecipeRepositoryError::not_found(*ghost.id()));
    assert_eq!(cache.len(), 1);
}

#[rstest]
#[tokio::test]
async fn undecodable_entry_is_discarded(harness: Harness) {
    let Harness {
        repo,
        cache,
        cached,
        ctx,
    } = harness;
    cache
        .set(&RecipeCacheKey::all(), json!({"not": "a list"}), CachePolicy::default())
        .await
        .expect("stored");

    let listed = cached.get_all(&ctx).await.expect("listed");

    assert!(listed.is_empty());
    assert_eq!(repo.get_all_calls(), 1);
}

#[rstest]
#[tokio::test]
async fn cache_failures_never_fail_the_call() {
    let mut cache = MockRecipeCache::new();
    cache
        .expect_get()
        .returning(|_| Err(RecipeCacheError::backend("unreachable")));
    cache
        .expect_set()
        .returning(|_, _, _| Err(RecipeCacheError::backend("unreachable")));
    cache
        .expect_remove()
        .returning(|_| Err(RecipeCacheError::backend("unreachable")));

    let repo = Arc::new(CountingRepository::default());
    let cached =
        CachedRecipeRepository::new(Arc::clone(&repo), Arc::new(cache), CachePolicy::default());
    let ctx = RequestContext::new();
    let soup = recipe("Soup");

    cached.add(&ctx, &soup).await.expect("stored despite cache");
    assert_eq!(cached.get_all(&ctx).await.expect("listed"), [soup.clone()]);
    assert_eq!(
        cached.get_by_id(&ctx, soup.id()).await.expect("present"),
        soup
    );
    cached.delete(&ctx, &soup).await.expect("deleted despite cache");

    assert_eq!(repo.get_all_calls(), 1);
    assert_eq!(repo.get_by_id_calls(), 1);
}

#[rstest]
#[tokio::test]
async fn writes_use_configured_policy() {
    let policy = CachePolicy::new(Duration::from_secs(1800), Some(Duration::from_secs(900)));
    let mut cache = MockRecipeCache::new();
    cache.expect_remove().returning(|_| Ok(()));
    cache
        .expect_set()
        .withf(move |key, _, used| key.as_str().starts_with("recipe_") && *used == policy)
        .times(1)
        .returning(|_, _, _| Ok(()));

    let cached = CachedRecipeRepository::new(
        Arc::new(CountingRepository::default()),
        Arc::new(cache),
        policy,
    );
    cached
        .add(&RequestContext::new(), &recipe("Soup"))
        .await
        .expect("stored");
    assert_eq!(cached.policy(), policy);
}
