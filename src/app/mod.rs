pub mod resource;
pub mod use_case;

pub mod transform {
    pub mod user {
        use std::str::FromStr;

        use crate::{
            app::resource::user::{FormAction, UserForm},
            base::ResourceID,
            domain::{entity::User, validation::BindingResult},
            error::resource::{ValidationErrorKind, ValidationFieldError},
        };

        /// Trimmed text, or `None` when the field is absent or blank.
        fn present(field: &Option<String>) -> Option<&str> {
            field
                .as_deref()
                .map(str::trim)
                .filter(|text| !text.is_empty())
        }

        fn parse_field<T>(
            binding: &mut BindingResult<User>,
            path: &str,
            raw: Option<&str>,
            message: &str,
        ) -> Option<T>
        where
            T: FromStr + ResourceID,
        {
            let raw = raw?;
            match raw.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    binding.reject(ValidationFieldError::from_resource::<T>(
                        raw.into(),
                        path.into(),
                        ValidationErrorKind::InvalidType,
                        message.into(),
                    ));
                    None
                }
            }
        }

        /// Binds submitted form fields into a [`User`].
        ///
        /// Conversion failures are recorded on the returned binding instead of
        /// aborting, so the form can be rendered again with every message.
        /// Identity is ignored on create and required on update.
        pub fn bind_user(form: UserForm, action: FormAction) -> BindingResult<User> {
            let mut binding = BindingResult::new(User {
                name: form.name.unwrap_or_default(),
                birthday: form.birthday.unwrap_or_default(),
                ..User::default()
            });

            let age = parse_field::<i32>(
                &mut binding,
                "/age",
                present(&form.age),
                "age must be a number",
            );
            binding.target.age = age;

            if action == FormAction::Update {
                let id = present(&form.id);
                if id.is_none() {
                    binding.reject(ValidationFieldError::from_resource::<i64>(
                        String::new(),
                        "/id".into(),
                        ValidationErrorKind::Required,
                        "id is required to update a user".into(),
                    ));
                }
                let id = parse_field::<i64>(&mut binding, "/id", id, "id must be a number");
                binding.target.id = id;
            }

            binding
        }

        impl From<User> for UserForm {
            fn from(user: User) -> Self {
                Self {
                    id: user.id.map(|id| id.to_string()),
                    name: Some(user.name),
                    age: user.age.map(|age| age.to_string()),
                    birthday: Some(user.birthday),
                }
            }
        }

    }
}
