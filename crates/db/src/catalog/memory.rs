//! In-memory catalog used to exercise the listing and export pipeline
//! without a database.
//!
//! Unlike PostgreSQL it enforces no foreign keys: a game may point at a
//! category that does not exist, which is how tests reach the unresolved
//! category path of the export.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use gamezone_core::pagination::PageRequest;
use gamezone_core::search::SearchFilter;
use gamezone_core::types::DbId;

use super::{GameReader, GameWriter, SelectListSource};
use crate::models::category::Category;
use crate::models::device::Device;
use crate::models::game::{CreateGame, Game, GameDetails, GameListItem, UpdateGame};
use crate::models::select::SelectItem;

#[derive(Debug, Default)]
struct State {
    next_id: DbId,
    categories: Vec<Category>,
    devices: Vec<Device>,
    /// Kept in ascending id order.
    games: Vec<Game>,
    /// `(game_id, device_id)` association rows.
    game_devices: Vec<(DbId, DbId)>,
}

impl State {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }

    fn category_name(&self, id: DbId) -> Option<String> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.clone())
    }

    fn device_ids(&self, game_id: DbId) -> Vec<DbId> {
        let mut ids: Vec<DbId> = self
            .game_devices
            .iter()
            .filter(|(g, _)| *g == game_id)
            .map(|(_, d)| *d)
            .collect();
        ids.sort_unstable();
        ids
    }

    fn set_devices(&mut self, game_id: DbId, device_ids: &[DbId]) {
        self.game_devices.retain(|(g, _)| *g != game_id);
        for &device_id in device_ids {
            if !self.game_devices.contains(&(game_id, device_id)) {
                self.game_devices.push((game_id, device_id));
            }
        }
    }

    fn list_item(&self, game: &Game) -> GameListItem {
        GameListItem {
            id: game.id,
            name: game.name.clone(),
            description: game.description.clone(),
            category_id: game.category_id,
            category_name: self.category_name(game.category_id),
            cover: game.cover.clone(),
            device_ids: self.device_ids(game.id),
        }
    }

    fn matching<'a>(&'a self, filter: &'a SearchFilter) -> impl Iterator<Item = &'a Game> + 'a {
        self.games.iter().filter(move |g| {
            filter.matches(&g.name, self.category_name(g.category_id).as_deref())
        })
    }
}

/// Mutex-guarded in-memory store implementing every catalog trait.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    state: Mutex<State>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a category and return its id.
    pub fn add_category(&self, name: &str) -> DbId {
        let mut state = self.state();
        let id = state.next_id();
        let now = Utc::now();
        state.categories.push(Category {
            id,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        });
        id
    }

    /// Add a device and return its id.
    pub fn add_device(&self, name: &str) -> DbId {
        let mut state = self.state();
        let id = state.next_id();
        let now = Utc::now();
        state.devices.push(Device {
            id,
            name: name.to_string(),
            icon: String::new(),
            created_at: now,
            updated_at: now,
        });
        id
    }

    /// Insert a game directly, bypassing the async writer.
    pub fn insert_game(&self, name: &str, category_id: DbId, device_ids: &[DbId]) -> DbId {
        let mut state = self.state();
        let id = state.next_id();
        let now = Utc::now();
        state.games.push(Game {
            id,
            name: name.to_string(),
            description: String::new(),
            category_id,
            cover: format!("{id}.png"),
            created_at: now,
            updated_at: now,
        });
        state.set_devices(id, device_ids);
        id
    }

    pub fn game_count(&self) -> usize {
        self.state().games.len()
    }

    /// Current device ids of a game, ascending.
    pub fn devices_of(&self, game_id: DbId) -> Vec<DbId> {
        self.state().device_ids(game_id)
    }
}

#[async_trait]
impl GameReader for MemoryCatalog {
    async fn count_games(&self) -> Result<i64, sqlx::Error> {
        Ok(self.state().games.len() as i64)
    }

    async fn count_matching(&self, filter: &SearchFilter) -> Result<i64, sqlx::Error> {
        Ok(self.state().matching(filter).count() as i64)
    }

    async fn list_matching(
        &self,
        filter: &SearchFilter,
        page: Option<&PageRequest>,
    ) -> Result<Vec<GameListItem>, sqlx::Error> {
        let state = self.state();
        let items: Vec<GameListItem> = state
            .matching(filter)
            .map(|g| state.list_item(g))
            .collect();
        Ok(match page {
            Some(page) => page.slice(&items).to_vec(),
            None => items,
        })
    }

    async fn find_game(&self, id: DbId) -> Result<Option<GameDetails>, sqlx::Error> {
        let state = self.state();
        let Some(game) = state.games.iter().find(|g| g.id == id) else {
            return Ok(None);
        };
        let device_ids = state.device_ids(id);
        let devices = state
            .devices
            .iter()
            .filter(|d| device_ids.contains(&d.id))
            .cloned()
            .collect();
        Ok(Some(GameDetails {
            game: game.clone(),
            category_name: state.category_name(game.category_id),
            devices,
        }))
    }
}

#[async_trait]
impl GameWriter for MemoryCatalog {
    async fn create_game(&self, input: &CreateGame) -> Result<Game, sqlx::Error> {
        let mut state = self.state();
        let id = state.next_id();
        let now = Utc::now();
        let game = Game {
            id,
            name: input.name.clone(),
            description: input.description.clone(),
            category_id: input.category_id,
            cover: input.cover.clone(),
            created_at: now,
            updated_at: now,
        };
        state.games.push(game.clone());
        state.set_devices(id, &input.device_ids);
        Ok(game)
    }

    async fn update_game(
        &self,
        id: DbId,
        input: &UpdateGame,
    ) -> Result<Option<Game>, sqlx::Error> {
        let mut state = self.state();
        let Some(game) = state.games.iter_mut().find(|g| g.id == id) else {
            return Ok(None);
        };
        game.name = input.name.clone();
        game.description = input.description.clone();
        game.category_id = input.category_id;
        if let Some(cover) = &input.cover {
            game.cover = cover.clone();
        }
        game.updated_at = Utc::now();
        let updated = game.clone();
        state.set_devices(id, &input.device_ids);
        Ok(Some(updated))
    }

    async fn delete_game(&self, id: DbId) -> Result<Option<Game>, sqlx::Error> {
        let mut state = self.state();
        let Some(pos) = state.games.iter().position(|g| g.id == id) else {
            return Ok(None);
        };
        let game = state.games.remove(pos);
        state.game_devices.retain(|(g, _)| *g != id);
        Ok(Some(game))
    }
}

#[async_trait]
impl SelectListSource for MemoryCatalog {
    async fn category_items(&self) -> Result<Vec<SelectItem>, sqlx::Error> {
        let mut items: Vec<SelectItem> = self
            .state()
            .categories
            .iter()
            .map(|c| SelectItem {
                value: c.id,
                text: c.name.clone(),
            })
            .collect();
        items.sort_by(|a, b| a.text.cmp(&b.text));
        Ok(items)
    }

    async fn device_items(&self) -> Result<Vec<SelectItem>, sqlx::Error> {
        let mut items: Vec<SelectItem> = self
            .state()
            .devices
            .iter()
            .map(|d| SelectItem {
                value: d.id,
                text: d.name.clone(),
            })
            .collect();
        items.sort_by(|a, b| a.text.cmp(&b.text));
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(name: &str, category_id: DbId, device_ids: Vec<DbId>) -> UpdateGame {
        UpdateGame {
            name: name.to_string(),
            description: String::new(),
            category_id,
            cover: None,
            device_ids,
        }
    }

    #[tokio::test]
    async fn update_replaces_device_set() {
        let catalog = MemoryCatalog::new();
        let sports = catalog.add_category("Sports");
        let ps = catalog.add_device("PlayStation");
        let xbox = catalog.add_device("Xbox");
        let pc = catalog.add_device("PC");
        let id = catalog.insert_game("FIFA", sports, &[ps, xbox]);

        let updated = catalog
            .update_game(id, &update("FIFA 25", sports, vec![pc]))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "FIFA 25");
        assert_eq!(updated.cover, format!("{id}.png"));
        assert_eq!(catalog.devices_of(id), vec![pc]);
    }

    #[tokio::test]
    async fn update_of_missing_game_changes_nothing() {
        let catalog = MemoryCatalog::new();
        let sports = catalog.add_category("Sports");
        let ps = catalog.add_device("PlayStation");
        let id = catalog.insert_game("FIFA", sports, &[ps]);

        let result = catalog
            .update_game(id + 100, &update("Ghost", sports, vec![]))
            .await
            .unwrap();

        assert!(result.is_none());
        let details = catalog.find_game(id).await.unwrap().unwrap();
        assert_eq!(details.game.name, "FIFA");
        assert_eq!(details.device_ids(), vec![ps]);
    }

    #[tokio::test]
    async fn delete_removes_game_and_associations() {
        let catalog = MemoryCatalog::new();
        let sports = catalog.add_category("Sports");
        let ps = catalog.add_device("PlayStation");
        let id = catalog.insert_game("FIFA", sports, &[ps]);

        let deleted = catalog.delete_game(id).await.unwrap();
        assert_eq!(deleted.map(|g| g.id), Some(id));
        assert_eq!(catalog.game_count(), 0);
        assert!(catalog.devices_of(id).is_empty());
    }

    #[tokio::test]
    async fn delete_of_missing_game_returns_none() {
        let catalog = MemoryCatalog::new();
        let sports = catalog.add_category("Sports");
        catalog.insert_game("FIFA", sports, &[]);

        assert!(catalog.delete_game(999).await.unwrap().is_none());
        assert_eq!(catalog.game_count(), 1);
    }

    #[tokio::test]
    async fn select_items_are_sorted_by_text() {
        let catalog = MemoryCatalog::new();
        let sports = catalog.add_category("Sports");
        let action = catalog.add_category("Action");

        let items = catalog.category_items().await.unwrap();
        assert_eq!(
            items,
            vec![
                SelectItem {
                    value: action,
                    text: "Action".into()
                },
                SelectItem {
                    value: sports,
                    text: "Sports".into()
                },
            ]
        );
    }
}
