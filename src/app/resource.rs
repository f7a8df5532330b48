pub mod user {
    use serde::{Deserialize, Serialize};

    use crate::{domain::entity::User, error::resource::ValidationFieldError};

    /// Location clients are sent to after every successful mutation.
    pub const USER_LIST_LOCATION: &str = "/users/";

    /// Raw form fields, bound as text before any conversion.
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct UserForm {
        pub id: Option<String>,
        pub name: Option<String>,
        pub age: Option<String>,
        pub birthday: Option<String>,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    #[serde(rename_all = "lowercase")]
    pub enum FormAction {
        Create,
        Update,
    }

    impl FormAction {
        pub fn as_str(&self) -> &'static str {
            match self {
                FormAction::Create => "create",
                FormAction::Update => "update",
            }
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    pub struct UserListView {
        #[serde(rename = "userList")]
        pub user_list: Vec<User>,
    }

    /// Form page model.
    ///
    /// `input` holds the text shown in each field. It is the submitted text
    /// when the form comes back with violations, so values that failed to
    /// bind into `user` are still displayed.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    pub struct UserFormView {
        pub user: User,
        pub input: UserForm,
        pub action: FormAction,
        pub errors: Vec<ValidationFieldError>,
    }

    impl UserFormView {
        pub fn new(user: User, action: FormAction) -> Self {
            Self {
                input: UserForm::from(user.clone()),
                user,
                action,
                errors: Vec::new(),
            }
        }

        pub fn rejected(
            user: User,
            input: UserForm,
            action: FormAction,
            errors: Vec<ValidationFieldError>,
        ) -> Self {
            Self {
                user,
                input,
                action,
                errors,
            }
        }

        #[cfg(test)]
        pub fn messages(&self, path: &str) -> Vec<&str> {
            self.errors
                .iter()
                .filter(|err| err.path == path)
                .map(|err| err.message.as_str())
                .collect()
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum View {
        UserList(UserListView),
        UserForm(UserFormView),
    }

    impl View {
        /// Identifier of the template rendering this view.
        pub fn name(&self) -> &'static str {
            match self {
                View::UserList(_) => "userList",
                View::UserForm(_) => "userForm",
            }
        }
    }

    /// What the client gets back from a controller operation.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Navigation {
        Render(View),
        Redirect(&'static str),
    }
}
