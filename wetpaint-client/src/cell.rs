//! Cell hierarchy operations

use crate::client::WetpaintClient;
use crate::error::WetpaintError;
use crate::transport::CallRequest;
use crate::user::UserToken;

const BASE_PATH: &str = "/CellService/";

/// Calls against the cell hierarchy
///
/// Carries the user token that authenticates cell creation. The read calls
/// do not send it.
#[derive(Debug, Clone)]
pub struct CellService<'a> {
    client: &'a WetpaintClient,
    user_token: Option<UserToken>,
}

impl<'a> CellService<'a> {
    pub(crate) fn new(client: &'a WetpaintClient, user_token: Option<UserToken>) -> Self {
        Self { client, user_token }
    }

    /// Token sent as `ticket` on authenticated calls
    pub fn user_token(&self) -> Option<&UserToken> {
        self.user_token.as_ref()
    }

    /// Create a cell and return its id
    ///
    /// `parent_cell_id` and `cell_id` are only sent when given. `ticket` is
    /// always sent, empty when this service holds no user token.
    ///
    /// # Errors
    ///
    /// * `WetpaintError::Request` - Network error
    /// * `WetpaintError::Call` - The service rejected the cell
    /// * `WetpaintError::MissingField` - The response carried no cell id
    pub fn create_cell(
        &self,
        display_name: &str,
        url: &str,
        parent_cell_id: Option<&str>,
        cell_id: Option<&str>,
    ) -> Result<String, WetpaintError> {
        let request = self.build_create_cell(display_name, url, parent_cell_id, cell_id);
        let response = self.client.execute_call(request)?;
        self.client.parser().extract_cell_id(&response.document)
    }

    pub(crate) fn build_create_cell(
        &self,
        display_name: &str,
        url: &str,
        parent_cell_id: Option<&str>,
        cell_id: Option<&str>,
    ) -> CallRequest {
        CallRequest::post(format!("{BASE_PATH}createCell.do"))
            .param("cell.displayName", display_name)
            .param("cell.url", url)
            .param("output", "api")
            .param("ticket", self.user_token.as_ref().map_or("", UserToken::as_str))
            .param_opt("cell.parentCellId", parent_cell_id)
            .param_opt("cell.cellId", cell_id)
    }

    /// Fetch a cell, returning the raw response body
    pub fn get_cell(&self, cell_id: &str) -> Result<String, WetpaintError> {
        let request = CallRequest::get(format!("{BASE_PATH}getCell.do"))
            .param("cell.cellId", cell_id)
            .param("output", "api");
        Ok(self.client.execute_call(request)?.body)
    }

    /// Fetch a cell together with its children, returning the raw response body
    pub fn get_cell_with_children(&self, cell_id: &str) -> Result<String, WetpaintError> {
        let request = CallRequest::get(format!("{BASE_PATH}getCellWithChildren.do"))
            .param("cell.cellId", cell_id);
        Ok(self.client.execute_call(request)?.body)
    }

    /// Fetch a cell's content, returning the raw response body
    pub fn get_cell_content(&self, cell_id: &str) -> Result<String, WetpaintError> {
        let request = CallRequest::get(format!("{BASE_PATH}getCellContent.do"))
            .param("cell.cellId", cell_id);
        Ok(self.client.execute_call(request)?.body)
    }
}
