//! Chart of accounts registry.

use std::collections::HashMap;

use neraca_shared::types::AccountId;

use super::error::AccountError;
use super::types::{Account, AccountType, NewAccount};

/// Arena-backed chart of accounts.
///
/// Accounts are stored in an id-indexed map with a unique code index.
/// Hierarchy edits walk the ancestor chain from the proposed parent toward
/// the root and reject any chain that would contain the account itself.
#[derive(Debug, Default)]
pub struct ChartOfAccounts {
    accounts: HashMap<AccountId, Account>,
    by_code: HashMap<String, AccountId>,
}

impl ChartOfAccounts {
    /// Creates an empty chart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new account.
    ///
    /// The level is derived from the parent (root = 1) and the normal side
    /// defaults from the account type unless explicitly overridden.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateCode` if the code exists, `ParentNotFound` if the
    /// parent id is unknown, or `CycleDetected` if the parent chain is
    /// corrupt.
    pub fn create_account(&mut self, input: NewAccount) -> Result<AccountId, AccountError> {
        if self.by_code.contains_key(&input.code) {
            return Err(AccountError::DuplicateCode(input.code));
        }

        let id = AccountId::new();
        let level = match input.parent_id {
            Some(parent_id) => {
                let parent = self
                    .accounts
                    .get(&parent_id)
                    .ok_or(AccountError::ParentNotFound(parent_id))?;
                self.ensure_no_cycle(id, parent_id)?;
                parent.level + 1
            }
            None => 1,
        };

        let account = Account {
            id,
            normal_side: input
                .normal_side
                .unwrap_or_else(|| input.account_type.default_normal_side()),
            code: input.code.clone(),
            name: input.name,
            account_type: input.account_type,
            level,
            is_posting: input.is_posting,
            parent_id: input.parent_id,
            is_active: true,
        };

        self.by_code.insert(input.code, id);
        self.accounts.insert(id, account);
        Ok(id)
    }

    /// Returns the account with the given id.
    pub fn account(&self, id: AccountId) -> Result<&Account, AccountError> {
        self.accounts
            .get(&id)
            .ok_or(AccountError::AccountNotFound(id))
    }

    /// Returns the account with the given code, if any.
    #[must_use]
    pub fn find_by_code(&self, code: &str) -> Option<&Account> {
        self.by_code.get(code).and_then(|id| self.accounts.get(id))
    }

    /// Validates that an account may receive journal lines.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound`, `AccountInactive`, or
    /// `AccountNotPostable`.
    pub fn validate_for_posting(&self, id: AccountId) -> Result<&Account, AccountError> {
        let account = self.account(id)?;
        if !account.is_active {
            return Err(AccountError::AccountInactive(id));
        }
        if !account.is_posting {
            return Err(AccountError::AccountNotPostable(id));
        }
        Ok(account)
    }

    /// Moves an account under a new parent.
    ///
    /// `has_posted_lines` is supplied by the journal ledger, which is the
    /// only component that knows posted usage.
    ///
    /// # Errors
    ///
    /// Returns `AccountInUse` if the account has posted lines,
    /// `CycleDetected` if the new parent chain would contain the account,
    /// or not-found errors for unknown ids.
    pub fn reparent<F>(
        &mut self,
        id: AccountId,
        new_parent_id: Option<AccountId>,
        has_posted_lines: F,
    ) -> Result<(), AccountError>
    where
        F: Fn(AccountId) -> bool,
    {
        self.account(id)?;
        if has_posted_lines(id) {
            return Err(AccountError::AccountInUse(id));
        }

        let new_level = match new_parent_id {
            Some(parent_id) => {
                let parent = self
                    .accounts
                    .get(&parent_id)
                    .ok_or(AccountError::ParentNotFound(parent_id))?;
                self.ensure_no_cycle(id, parent_id)?;
                parent.level + 1
            }
            None => 1,
        };

        if let Some(account) = self.accounts.get_mut(&id) {
            account.parent_id = new_parent_id;
            account.level = new_level;
        }
        self.recompute_subtree_levels(id);
        Ok(())
    }

    /// Changes the account type (and resets the normal side to the new
    /// type's default).
    ///
    /// # Errors
    ///
    /// Returns `AccountInUse` if the account has posted lines.
    pub fn change_type<F>(
        &mut self,
        id: AccountId,
        new_type: AccountType,
        has_posted_lines: F,
    ) -> Result<(), AccountError>
    where
        F: Fn(AccountId) -> bool,
    {
        self.account(id)?;
        if has_posted_lines(id) {
            return Err(AccountError::AccountInUse(id));
        }
        if let Some(account) = self.accounts.get_mut(&id) {
            account.account_type = new_type;
            account.normal_side = new_type.default_normal_side();
        }
        Ok(())
    }

    /// Deactivates an account; inactive accounts reject new journal lines.
    pub fn deactivate(&mut self, id: AccountId) -> Result<(), AccountError> {
        self.set_active(id, false)
    }

    /// Reactivates a previously deactivated account.
    pub fn reactivate(&mut self, id: AccountId) -> Result<(), AccountError> {
        self.set_active(id, true)
    }

    fn set_active(&mut self, id: AccountId, active: bool) -> Result<(), AccountError> {
        let account = self
            .accounts
            .get_mut(&id)
            .ok_or(AccountError::AccountNotFound(id))?;
        account.is_active = active;
        Ok(())
    }

    /// Returns the ids of every account in the subtree rooted at `id`,
    /// excluding `id` itself.
    #[must_use]
    pub fn descendants(&self, id: AccountId) -> Vec<AccountId> {
        let mut result = Vec::new();
        let mut frontier = vec![id];
        while let Some(current) = frontier.pop() {
            for account in self.accounts.values() {
                if account.parent_id == Some(current) {
                    result.push(account.id);
                    frontier.push(account.id);
                }
            }
        }
        result
    }

    /// Returns all posting accounts sorted by code for deterministic
    /// report ordering.
    #[must_use]
    pub fn posting_accounts(&self) -> Vec<&Account> {
        let mut accounts: Vec<&Account> =
            self.accounts.values().filter(|a| a.is_posting).collect();
        accounts.sort_by(|a, b| a.code.cmp(&b.code));
        accounts
    }

    /// Returns the number of accounts in the chart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns true if the chart has no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Walks from `parent_id` toward the root; errors if `id` appears.
    ///
    /// The walk is bounded by the account count so a corrupt chain can
    /// never loop forever.
    fn ensure_no_cycle(&self, id: AccountId, parent_id: AccountId) -> Result<(), AccountError> {
        let mut current = Some(parent_id);
        let mut steps = 0usize;
        while let Some(ancestor) = current {
            if ancestor == id {
                return Err(AccountError::CycleDetected(id));
            }
            steps += 1;
            if steps > self.accounts.len() {
                return Err(AccountError::CycleDetected(id));
            }
            current = self.accounts.get(&ancestor).and_then(|a| a.parent_id);
        }
        Ok(())
    }

    /// Re-derives levels for the subtree rooted at `id` after a reparent.
    fn recompute_subtree_levels(&mut self, id: AccountId) {
        let mut frontier = vec![id];
        while let Some(current) = frontier.pop() {
            let parent_level = match self.accounts.get(&current) {
                Some(account) => account.level,
                None => continue,
            };
            let children: Vec<AccountId> = self
                .accounts
                .values()
                .filter(|a| a.parent_id == Some(current))
                .map(|a| a.id)
                .collect();
            for child in children {
                if let Some(account) = self.accounts.get_mut(&child) {
                    account.level = parent_level + 1;
                }
                frontier.push(child);
            }
        }
    }
}
