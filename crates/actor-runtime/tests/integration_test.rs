use actor_runtime::{ActorEntity, FrameworkError, ResourceActor, WeakResourceClient};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Account {
    id: u32,
    owner: String,
    balance: i64,
}

#[derive(Debug)]
struct AccountCreate {
    owner: String,
    opening_balance: i64,
}

#[derive(Debug)]
enum AccountAction {
    Withdraw(i64),
    /// Posts a deposit back through the actor's own mailbox.
    ScheduleDeposit(i64),
    Deposit(i64),
}

#[derive(Debug, thiserror::Error, PartialEq)]
enum AccountError {
    #[error("insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: i64, requested: i64 },
    #[error("negative opening balance")]
    NegativeOpening,
    #[error("sequence exhausted")]
    SequenceExhausted,
}

struct Bank {
    sequence: Arc<AtomicU32>,
    limit: u32,
    mailbox: Option<WeakResourceClient<Account>>,
}

#[async_trait]
impl ActorEntity for Account {
    type Id = u32;
    type Create = AccountCreate;
    type Action = AccountAction;
    type ActionResult = i64;
    type Context = Bank;
    type Error = AccountError;

    async fn assign_id(ctx: &Bank) -> Result<u32, AccountError> {
        let next = ctx.sequence.fetch_add(1, Ordering::SeqCst);
        if next > ctx.limit {
            return Err(AccountError::SequenceExhausted);
        }
        Ok(next)
    }

    fn from_create_params(id: u32, params: AccountCreate) -> Result<Self, AccountError> {
        if params.opening_balance < 0 {
            return Err(AccountError::NegativeOpening);
        }
        Ok(Self {
            id,
            owner: params.owner,
            balance: params.opening_balance,
        })
    }

    async fn handle_action(
        &mut self,
        action: AccountAction,
        ctx: &Bank,
    ) -> Result<i64, AccountError> {
        match action {
            AccountAction::Withdraw(amount) => {
                if amount > self.balance {
                    return Err(AccountError::InsufficientFunds {
                        balance: self.balance,
                        requested: amount,
                    });
                }
                self.balance -= amount;
            }
            AccountAction::ScheduleDeposit(amount) => {
                if let Some(client) = ctx.mailbox.as_ref().and_then(|m| m.upgrade()) {
                    let id = self.id;
                    tokio::spawn(async move {
                        let _ = client.perform_action(id, AccountAction::Deposit(amount)).await;
                    });
                }
            }
            AccountAction::Deposit(amount) => self.balance += amount,
        }
        Ok(self.balance)
    }
}

fn bank(limit: u32) -> Bank {
    Bank {
        sequence: Arc::new(AtomicU32::new(1)),
        limit,
        mailbox: None,
    }
}

// --- Tests ---

#[tokio::test]
async fn test_runtime_full_lifecycle() {
    let (actor, client) = ResourceActor::<Account>::new(10);
    let handle = tokio::spawn(actor.run(bank(10)));

    let id = client
        .create(AccountCreate {
            owner: "Alice".into(),
            opening_balance: 100,
        })
        .await
        .unwrap();
    assert_eq!(id, 1);

    let balance = client
        .perform_action(id, AccountAction::Withdraw(30))
        .await
        .unwrap();
    assert_eq!(balance, 70);

    let err = client
        .perform_action(id, AccountAction::Withdraw(500))
        .await
        .unwrap_err();
    assert_eq!(
        err.into_entity_error::<AccountError>().unwrap(),
        AccountError::InsufficientFunds {
            balance: 70,
            requested: 500
        }
    );

    // Rejected actions leave the entity untouched
    let account = client.get(id).await.unwrap().unwrap();
    assert_eq!(account.balance, 70);
    assert_eq!(account.owner, "Alice");

    let missing = client
        .perform_action(99, AccountAction::Withdraw(1))
        .await
        .unwrap_err();
    assert!(matches!(missing, FrameworkError::NotFound(id) if id == "99"));

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_create_failures_are_not_stored() {
    let (actor, client) = ResourceActor::<Account>::new(10);
    let handle = tokio::spawn(actor.run(bank(1)));

    let err = client
        .create(AccountCreate {
            owner: "Bob".into(),
            opening_balance: -5,
        })
        .await
        .unwrap_err();
    assert_eq!(
        err.into_entity_error::<AccountError>().unwrap(),
        AccountError::NegativeOpening
    );
    assert!(client.get(1).await.unwrap().is_none());

    // The id was consumed by the failed attempt
    let err = client
        .create(AccountCreate {
            owner: "Bob".into(),
            opening_balance: 5,
        })
        .await
        .unwrap_err();
    assert_eq!(
        err.into_entity_error::<AccountError>().unwrap(),
        AccountError::SequenceExhausted
    );

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_self_addressed_messages_and_weak_shutdown() {
    let (actor, client) = ResourceActor::<Account>::new(10);
    let context = Bank {
        mailbox: Some(client.downgrade()),
        ..bank(10)
    };
    let handle = tokio::spawn(actor.run(context));

    let id = client
        .create(AccountCreate {
            owner: "Carol".into(),
            opening_balance: 0,
        })
        .await
        .unwrap();

    client
        .perform_action(id, AccountAction::ScheduleDeposit(25))
        .await
        .unwrap();

    let mut balance = 0;
    for _ in 0..50 {
        balance = client.get(id).await.unwrap().unwrap().balance;
        if balance == 25 {
            break;
        }
        tokio::task::yield_now().await;
    }
    assert_eq!(balance, 25);

    // The weak handle held by the context does not keep the actor alive
    let weak = client.downgrade();
    drop(client);
    handle.await.unwrap();
    assert!(weak.upgrade().is_none());
}
