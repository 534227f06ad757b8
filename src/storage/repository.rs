use super::file::{Collection, FileStorage};
use crate::core::{Comment, CommentId, Role, StatusLog, Ticket, TicketId, User, UserId};
use crate::error::{DeskError, Result};

/// Repository trait for user accounts
pub trait UserRepository: Send + Sync {
    /// Persist a new user, rejecting a duplicate email
    fn create_user(&self, user: &User) -> Result<()>;

    /// Loads a user by ID
    fn load_user(&self, id: &UserId) -> Result<User>;

    /// Finds a user by (normalized) email
    fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Loads all users, oldest first
    fn load_all_users(&self) -> Result<Vec<User>>;

    /// Whether at least one account has `role`
    fn has_user_with_role(&self, role: Role) -> Result<bool> {
        Ok(self.load_all_users()?.iter().any(|u| u.role == role))
    }
}

/// Repository trait for ticket storage operations
pub trait TicketRepository: Send + Sync {
    /// Saves a ticket to the repository
    fn save(&self, ticket: &Ticket) -> Result<()>;

    /// Loads a ticket by ID
    fn load(&self, id: &TicketId) -> Result<Ticket>;

    /// Loads all tickets
    fn load_all(&self) -> Result<Vec<Ticket>>;

    /// Deletes a ticket by ID
    fn delete(&self, id: &TicketId) -> Result<()>;

    /// Checks if a ticket exists by ID
    fn exists(&self, id: &TicketId) -> Result<bool>;

    /// Finds tickets matching a predicate
    fn find<F>(&self, predicate: F) -> Result<Vec<Ticket>>
    where
        F: Fn(&Ticket) -> bool;

    /// Finds the ticket with `id` only if it also matches `predicate`
    fn find_one<F>(&self, id: &TicketId, predicate: F) -> Result<Option<Ticket>>
    where
        F: Fn(&Ticket) -> bool,
    {
        match self.load(id) {
            Ok(ticket) if predicate(&ticket) => Ok(Some(ticket)),
            Ok(_) => Ok(None),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Repository trait for ticket comments
pub trait CommentRepository: Send + Sync {
    /// Saves (creates or replaces) a comment
    fn save_comment(&self, comment: &Comment) -> Result<()>;

    /// Loads a comment by ID
    fn load_comment(&self, id: &CommentId) -> Result<Comment>;

    /// All comments on a ticket, oldest first
    fn comments_for_ticket(&self, ticket: &TicketId) -> Result<Vec<Comment>>;

    /// Deletes a comment by ID
    fn delete_comment(&self, id: &CommentId) -> Result<()>;

    /// Deletes every comment on a ticket, returning how many were removed
    fn delete_comments_for_ticket(&self, ticket: &TicketId) -> Result<usize>;
}

/// Append-only repository for the status audit trail
pub trait StatusLogRepository: Send + Sync {
    /// Appends an entry. An entry with the same id is never overwritten.
    fn append_status_log(&self, entry: &StatusLog) -> Result<()>;

    /// All entries for a ticket, oldest first
    fn status_logs_for_ticket(&self, ticket: &TicketId) -> Result<Vec<StatusLog>>;
}

/// Combined repository trait
pub trait Store: UserRepository + TicketRepository + CommentRepository + StatusLogRepository {
    /// Persist a status change together with its audit entry
    ///
    /// If the entry cannot be appended the ticket is restored to `previous`
    /// and the append error is returned, so a status change never survives
    /// without its log entry.
    fn record_transition(&self, previous: &Ticket, updated: &Ticket, entry: &StatusLog) -> Result<()> {
        self.save(updated)?;
        if let Err(err) = self.append_status_log(entry) {
            tracing::error!(
                ticket = %updated.id.short(),
                "Audit append failed, restoring status {}: {err}",
                previous.status
            );
            if let Err(restore_err) = self.save(previous) {
                tracing::error!(ticket = %previous.id.short(), "Failed to restore ticket: {restore_err}");
            }
            return Err(err);
        }
        Ok(())
    }
}

/// Implementation of Store for types that implement every repository
impl<T> Store for T where
    T: UserRepository + TicketRepository + CommentRepository + StatusLogRepository
{
}

impl UserRepository for FileStorage {
    fn create_user(&self, user: &User) -> Result<()> {
        self.with_lock(|| {
            let users: Vec<User> = self.read_all(Collection::Users)?;
            if users.iter().any(|u| u.email == user.email) {
                return Err(DeskError::DuplicateKey {
                    field: "email".to_string(),
                });
            }
            self.write_record(Collection::Users, &user.id, user)
        })
    }

    fn load_user(&self, id: &UserId) -> Result<User> {
        self.read_record(Collection::Users, id)?
            .ok_or_else(|| DeskError::UserNotFound { id: id.to_string() })
    }

    fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let users: Vec<User> = self.read_all(Collection::Users)?;
        Ok(users.into_iter().find(|u| u.email == email))
    }

    fn load_all_users(&self) -> Result<Vec<User>> {
        let mut users: Vec<User> = self.read_all(Collection::Users)?;
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(users)
    }
}

impl TicketRepository for FileStorage {
    fn save(&self, ticket: &Ticket) -> Result<()> {
        self.with_lock(|| self.write_record(Collection::Tickets, &ticket.id, ticket))
    }

    fn load(&self, id: &TicketId) -> Result<Ticket> {
        self.read_record(Collection::Tickets, id)?
            .ok_or_else(|| DeskError::TicketNotFound { id: id.to_string() })
    }

    fn load_all(&self) -> Result<Vec<Ticket>> {
        self.read_all(Collection::Tickets)
    }

    fn delete(&self, id: &TicketId) -> Result<()> {
        let removed = self.with_lock(|| self.remove_record(Collection::Tickets, id))?;
        if removed {
            Ok(())
        } else {
            Err(DeskError::TicketNotFound { id: id.to_string() })
        }
    }

    fn exists(&self, id: &TicketId) -> Result<bool> {
        Ok(self.record_exists(Collection::Tickets, id))
    }

    fn find<F>(&self, predicate: F) -> Result<Vec<Ticket>>
    where
        F: Fn(&Ticket) -> bool,
    {
        let tickets = self.load_all()?;
        Ok(tickets.into_iter().filter(predicate).collect())
    }
}

impl CommentRepository for FileStorage {
    fn save_comment(&self, comment: &Comment) -> Result<()> {
        self.with_lock(|| self.write_record(Collection::Comments, &comment.id, comment))
    }

    fn load_comment(&self, id: &CommentId) -> Result<Comment> {
        self.read_record(Collection::Comments, id)?
            .ok_or_else(|| DeskError::CommentNotFound { id: id.to_string() })
    }

    fn comments_for_ticket(&self, ticket: &TicketId) -> Result<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .read_all::<Comment>(Collection::Comments)?
            .into_iter()
            .filter(|c| &c.ticket == ticket)
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }

    fn delete_comment(&self, id: &CommentId) -> Result<()> {
        let removed = self.with_lock(|| self.remove_record(Collection::Comments, id))?;
        if removed {
            Ok(())
        } else {
            Err(DeskError::CommentNotFound { id: id.to_string() })
        }
    }

    fn delete_comments_for_ticket(&self, ticket: &TicketId) -> Result<usize> {
        self.with_lock(|| {
            let comments: Vec<Comment> = self.read_all(Collection::Comments)?;
            let mut removed = 0;
            for comment in comments.iter().filter(|c| &c.ticket == ticket) {
                if self.remove_record(Collection::Comments, &comment.id)? {
                    removed += 1;
                }
            }
            Ok(removed)
        })
    }
}

impl StatusLogRepository for FileStorage {
    fn append_status_log(&self, entry: &StatusLog) -> Result<()> {
        self.with_lock(|| {
            if self.record_exists(Collection::StatusLogs, &entry.id) {
                return Err(DeskError::custom(format!(
                    "Status log {} already exists",
                    entry.id
                )));
            }
            self.write_record(Collection::StatusLogs, &entry.id, entry)
        })
    }

    fn status_logs_for_ticket(&self, ticket: &TicketId) -> Result<Vec<StatusLog>> {
        let mut entries: Vec<StatusLog> = self
            .read_all::<StatusLog>(Collection::StatusLogs)?
            .into_iter()
            .filter(|e| &e.ticket == ticket)
            .collect();
        entries.sort_by(|a, b| a.changed_at.cmp(&b.changed_at));
        Ok(entries)
    }
}
