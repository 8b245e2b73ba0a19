use std::sync::Arc;

use async_trait::async_trait;
use salvo::{
    http::{Method, StatusCode},
    writer::Json,
    Depot, FlowCtrl, Handler, Request, Response,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    app::{
        resource::{
            account::{CreateAccount, DeleteAccount, TransferFunds, UpdateAccount},
            envelope::{Envelope, MissingAccount},
        },
        use_case,
    },
    domain::repository::AccountRepository,
    error::http::ApiError,
};

type HandlerResult = Result<(), ApiError>;

macro_rules! render_err {
    ($result:expr, $response:ident) => {
        if let Err(err) = $result {
            $response.render(err);
        }
    };
}

fn render<T: Serialize + Send>(res: &mut Response, status: StatusCode, body: T) {
    res.set_status_code(status);
    res.render(Json(body));
}

/// Decode the request body as JSON, whatever its declared content type.
async fn parse_json<T: DeserializeOwned>(req: &mut Request) -> Result<T, ApiError> {
    let payload = req.payload().await?;
    Ok(serde_json::from_slice(payload)?)
}

/// Extract the account id from the `id` path param.
fn extract_id(req: &Request) -> Result<i64, ApiError> {
    let value = req.params().get("id").cloned().unwrap_or_default();
    value
        .parse()
        .map_err(|source| ApiError::InvalidId { value, source })
}

/// `/accounts`: list, create and delete.
pub struct AccountsController<R> {
    repository: Arc<R>,
}

impl<R: AccountRepository> AccountsController<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    async fn list(&self, res: &mut Response) -> HandlerResult {
        let accounts = self.repository.list_accounts().await?;
        render(res, StatusCode::OK, Envelope::with_data("success", accounts));
        Ok(())
    }

    async fn create(&self, req: &mut Request, res: &mut Response) -> HandlerResult {
        let dto: CreateAccount = parse_json(req).await?;
        use_case::account::create_account(self.repository.as_ref(), dto).await?;
        render(res, StatusCode::CREATED, Envelope::message("account created"));
        Ok(())
    }

    async fn delete(&self, req: &mut Request, res: &mut Response) -> HandlerResult {
        let dto: DeleteAccount = parse_json(req).await?;
        self.repository.delete_account(dto.id).await?;
        render(res, StatusCode::OK, Envelope::message("account deleted"));
        Ok(())
    }
}

#[async_trait]
impl<R: AccountRepository + 'static> Handler for AccountsController<R> {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let result = match req.method().clone() {
            Method::GET => self.list(res).await,
            Method::POST => self.create(req, res).await,
            Method::DELETE => self.delete(req, res).await,
            method => Err(ApiError::MethodNotAllowed(method)),
        };
        render_err!(result, res);
    }
}

/// `/accounts/<id>`: fetch and update.
pub struct AccountController<R> {
    repository: Arc<R>,
}

impl<R: AccountRepository> AccountController<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    async fn find(&self, req: &mut Request, res: &mut Response) -> HandlerResult {
        let id = extract_id(req)?;
        let account = self.repository.get_account(id).await?;
        render(res, StatusCode::OK, Envelope::with_data("success", account));
        Ok(())
    }

    async fn update(&self, req: &mut Request, res: &mut Response) -> HandlerResult {
        let id = extract_id(req)?;

        // A failed existence check answers with a success status.
        if let Err(err) = self.repository.get_account(id).await {
            tracing::debug!("update of account {id} rejected: {err}");
            render(res, StatusCode::CREATED, MissingAccount::new(id));
            return Ok(());
        }

        let dto: UpdateAccount = parse_json(req).await?;
        let account = use_case::account::update_account(self.repository.as_ref(), id, dto).await?;
        render(
            res,
            StatusCode::OK,
            Envelope::with_data("account updated", account),
        );
        Ok(())
    }
}

#[async_trait]
impl<R: AccountRepository + 'static> Handler for AccountController<R> {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let result = match req.method().clone() {
            Method::GET => self.find(req, res).await,
            Method::PATCH => self.update(req, res).await,
            method => Err(ApiError::MethodNotAllowed(method)),
        };
        render_err!(result, res);
    }
}

/// `/accounts/transfer`: credit the destination account.
pub struct TransferController<R> {
    repository: Arc<R>,
}

impl<R: AccountRepository> TransferController<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    async fn transfer(&self, req: &mut Request, res: &mut Response) -> HandlerResult {
        let dto: TransferFunds = parse_json(req).await?;
        let account = use_case::account::transfer(self.repository.as_ref(), dto).await?;
        render(
            res,
            StatusCode::OK,
            Envelope::with_data("transfer succeed", account),
        );
        Ok(())
    }
}

#[async_trait]
impl<R: AccountRepository + 'static> Handler for TransferController<R> {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let result = match req.method().clone() {
            Method::POST => self.transfer(req, res).await,
            method => Err(ApiError::MethodNotAllowed(method)),
        };
        render_err!(result, res);
    }
}
