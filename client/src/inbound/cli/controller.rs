//! Binds subcommands to domain operations and renders their results.

use std::io::Write;
use std::sync::Arc;

use tracing::{info, warn};

use super::Command;
use super::error::CliError;
use super::render::{Marker, story_line, write_identity, write_stories};
use super::state::AppState;
use crate::domain::ports::{SessionStore, StoredSession, StoriesApi, UsersApi};
use crate::domain::{
    ErrorCode, LoginCredentials, NewAccount, ProfileUpdate, StoryDraft, StoryId, StoryList,
    StoryListService, User, UserService,
};

/// Adapters the controller drives.
#[derive(Clone)]
pub struct ControllerPorts {
    /// Remote story collection.
    pub stories: Arc<dyn StoriesApi>,
    /// Remote user records.
    pub users: Arc<dyn UsersApi>,
    /// Persisted session pair.
    pub session: Arc<dyn SessionStore>,
}

/// Front-end controller holding the application state.
pub struct Controller<W> {
    stories: StoryListService<dyn StoriesApi>,
    users: UserService<dyn UsersApi>,
    session: Arc<dyn SessionStore>,
    state: AppState,
    out: W,
}

impl<W: Write> Controller<W> {
    /// Read the session cache once and try to restore the user from it.
    ///
    /// A cache that cannot be read, or a cached session the server no longer
    /// accepts, leaves the controller logged out. A rejected token or a
    /// deleted account also clears the cache.
    pub async fn bootstrap(ports: ControllerPorts, out: W) -> Self {
        let ControllerPorts {
            stories,
            users,
            session,
        } = ports;
        let mut controller = Self {
            stories: StoryListService::new(stories),
            users: UserService::new(users),
            session,
            state: AppState::default(),
            out,
        };
        controller.state.user = controller.restore().await;
        controller
    }

    async fn restore(&self) -> Option<User> {
        let StoredSession { token, username } = match self.session.load() {
            Ok(stored) => stored,
            Err(err) => {
                warn!(error = %err, "ignoring unreadable session cache");
                return None;
            }
        };
        match self.users.restore_session(token, username).await {
            Ok(Some(user)) => {
                info!(username = %user.username(), "session restored");
                Some(user)
            }
            Ok(None) => None,
            Err(err) if matches!(err.code(), ErrorCode::Unauthorized | ErrorCode::NotFound) => {
                info!(code = ?err.code(), "cached session rejected; clearing it");
                if let Err(clear_err) = self.session.clear() {
                    warn!(error = %clear_err, "failed to clear rejected session");
                }
                None
            }
            Err(err) => {
                warn!(error = %err, "could not restore cached session");
                None
            }
        }
    }

    /// Current state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Give back the output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Run one command against the current state.
    ///
    /// # Errors
    ///
    /// Returns [`CliError`] when the operation fails; the state is left as
    /// the failed operation found it.
    pub async fn dispatch(&mut self, command: Command) -> Result<(), CliError> {
        match command {
            Command::Stories => self.show_stories().await,
            Command::Favorites => self.show_favorites(),
            Command::Mine => self.show_own_stories(),
            Command::Whoami => self.show_identity(),
            Command::Login { username, password } => {
                let user = self
                    .users
                    .login(&LoginCredentials::new(username, password))
                    .await?;
                self.sign_in(user, "Logged in as")
            }
            Command::Signup {
                name,
                username,
                password,
            } => {
                let user = self
                    .users
                    .create(&NewAccount::new(username, password, name))
                    .await?;
                self.sign_in(user, "Welcome,")
            }
            Command::Logout => self.log_out(),
            Command::Submit { author, title, url } => {
                self.submit(StoryDraft::new(author, title, url)).await
            }
            Command::Favorite { id } => self.toggle_favorite(StoryId::new(id)).await,
            Command::Delete { id } => self.delete(StoryId::new(id)).await,
            Command::Edit {
                id,
                author,
                title,
                url,
            } => {
                self.edit(StoryId::new(id), StoryDraft::new(author, title, url))
                    .await
            }
            Command::Profile { name, password } => {
                self.update_profile(ProfileUpdate::new(name, password))
                    .await
            }
        }
    }

    async fn load_stories(&mut self) -> Result<(), CliError> {
        if self.state.stories.is_none() {
            let list = self
                .stories
                .fetch_all()
                .await
                .map_err(CliError::StoriesUnavailable)?;
            self.state.stories = Some(list);
        }
        Ok(())
    }

    async fn show_stories(&mut self) -> Result<(), CliError> {
        self.load_stories().await?;
        let AppState { stories, user } = &self.state;
        let list = stories.as_ref().map_or(&[][..], StoryList::stories);
        write_stories(&mut self.out, list, "No stories yet.", |story| {
            Marker::for_viewer(user.as_ref(), story)
        })?;
        Ok(())
    }

    fn show_favorites(&mut self) -> Result<(), CliError> {
        let user = self.state.user.as_ref().ok_or(CliError::NotLoggedIn)?;
        write_stories(
            &mut self.out,
            user.favorites(),
            "No favorites added!",
            |_| Marker::Favorite,
        )?;
        Ok(())
    }

    fn show_own_stories(&mut self) -> Result<(), CliError> {
        let user = self.state.user.as_ref().ok_or(CliError::NotLoggedIn)?;
        write_stories(
            &mut self.out,
            user.own_stories(),
            "No stories added by user yet!",
            |_| Marker::Own,
        )?;
        Ok(())
    }

    fn show_identity(&mut self) -> Result<(), CliError> {
        match &self.state.user {
            Some(user) => write_identity(&mut self.out, user)?,
            None => writeln!(self.out, "Not logged in.")?,
        }
        Ok(())
    }

    fn sign_in(&mut self, user: User, greeting: &str) -> Result<(), CliError> {
        let token = user.require_token()?;
        self.session.save(token, user.username())?;
        info!(username = %user.username(), "signed in");
        writeln!(
            self.out,
            "{greeting} {} ({} favorites, {} stories)",
            user.username(),
            user.favorites().len(),
            user.own_stories().len()
        )?;
        self.state.user = Some(user);
        Ok(())
    }

    fn log_out(&mut self) -> Result<(), CliError> {
        self.state.log_out();
        self.session.clear()?;
        info!("signed out");
        writeln!(self.out, "Logged out.")?;
        Ok(())
    }

    async fn submit(&mut self, draft: StoryDraft) -> Result<(), CliError> {
        if self.state.user.is_none() {
            return Err(CliError::NotLoggedIn);
        }
        self.load_stories().await?;
        let AppState { stories, user } = &mut self.state;
        let (Some(list), Some(user)) = (stories.as_mut(), user.as_mut()) else {
            return Err(CliError::NotLoggedIn);
        };
        let story = self.stories.add_story(list, user, &draft).await?;
        writeln!(self.out, "Posted: {}", story_line(&story, Marker::Own))?;
        Ok(())
    }

    async fn toggle_favorite(&mut self, id: StoryId) -> Result<(), CliError> {
        let user = self.state.user.as_mut().ok_or(CliError::NotLoggedIn)?;
        if user.is_favorite(&id) {
            match self.users.remove_favorite_story(user, &id).await? {
                Some(story) => writeln!(self.out, "Removed from favorites: {}", story.title())?,
                None => writeln!(self.out, "Story {id} was not a favorite.")?,
            }
        } else {
            match self.users.add_favorite_story(user, &id).await? {
                Some(story) => writeln!(self.out, "Added to favorites: {}", story.title())?,
                None => writeln!(self.out, "Favorites unchanged.")?,
            }
        }
        Ok(())
    }

    async fn delete(&mut self, id: StoryId) -> Result<(), CliError> {
        if self.state.user.is_none() {
            return Err(CliError::NotLoggedIn);
        }
        self.load_stories().await?;
        let AppState { stories, user } = &mut self.state;
        let (Some(list), Some(user)) = (stories.as_mut(), user.as_mut()) else {
            return Err(CliError::NotLoggedIn);
        };
        self.stories.remove_story(list, user, &id).await?;
        writeln!(self.out, "Deleted story {id}.")?;
        Ok(())
    }

    async fn edit(&mut self, id: StoryId, draft: StoryDraft) -> Result<(), CliError> {
        if self.state.user.is_none() {
            return Err(CliError::NotLoggedIn);
        }
        self.load_stories().await?;
        let AppState { stories, user } = &mut self.state;
        let (Some(list), Some(user)) = (stories.as_mut(), user.as_mut()) else {
            return Err(CliError::NotLoggedIn);
        };
        let story = self.stories.update_story(list, user, &id, &draft).await?;
        writeln!(self.out, "Updated: {}", story_line(&story, Marker::Own))?;
        Ok(())
    }

    async fn update_profile(&mut self, update: ProfileUpdate) -> Result<(), CliError> {
        let user = self.state.user.as_mut().ok_or(CliError::NotLoggedIn)?;
        let refreshed = self.users.update_profile(user, &update).await?;
        let token = refreshed.require_token()?;
        self.session.save(token, refreshed.username())?;
        writeln!(
            self.out,
            "Profile updated for {} ({}).",
            refreshed.username(),
            refreshed.name()
        )?;
        self.state.user = Some(refreshed);
        Ok(())
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
