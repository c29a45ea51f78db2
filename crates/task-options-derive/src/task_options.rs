//! Task options macro implementation

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{
	meta::ParseNestedMeta,
	parse_macro_input,
	visit_mut::{self, VisitMut},
	Attribute, BoundLifetimes, Error, FnArg, GenericParam, Ident, ImplItem, ImplItemFn, ItemImpl,
	Lifetime, LitStr, ParenthesizedGenericArguments, TraitBound, Type, TypeBareFn, TypeReference,
};

const OPTION_ATTR: &str = "option";

#[derive(Default)]
struct TaskTypeArgs {
	name: Option<LitStr>,
	parent: Option<Type>,
}

impl TaskTypeArgs {
	fn parse(&mut self, meta: &ParseNestedMeta<'_>) -> syn::Result<()> {
		if meta.path.is_ident("name") {
			self.name = Some(meta.value()?.parse()?);
			Ok(())
		} else if meta.path.is_ident("parent") {
			self.parent = Some(meta.value()?.parse()?);
			Ok(())
		} else {
			Err(meta.error("unsupported task_options argument, expected `name` or `parent`"))
		}
	}
}

/// Parsed `#[option(name = "...", alias = "...", description = "...")]` marker.
struct OptionMarker {
	name: LitStr,
	aliases: Vec<LitStr>,
	description: LitStr,
}

impl OptionMarker {
	fn parse(attr: &Attribute) -> syn::Result<Self> {
		let mut name = None;
		let mut aliases = Vec::new();
		let mut description = None;

		attr.parse_nested_meta(|meta| {
			if meta.path.is_ident("name") {
				name = Some(non_empty(meta.value()?.parse()?)?);
			} else if meta.path.is_ident("alias") {
				aliases.push(non_empty(meta.value()?.parse()?)?);
			} else if meta.path.is_ident("description") {
				description = Some(meta.value()?.parse()?);
			} else {
				return Err(meta.error(
					"unsupported option argument, expected `name`, `alias` or `description`",
				));
			}
			Ok(())
		})?;

		Ok(Self {
			name: name.ok_or_else(|| Error::new_spanned(attr, "option marker needs a `name`"))?,
			aliases,
			description: description
				.ok_or_else(|| Error::new_spanned(attr, "option marker needs a `description`"))?,
		})
	}

	fn to_tokens(&self) -> TokenStream2 {
		let Self {
			name,
			aliases,
			description,
		} = self;

		quote! {
			::sd_task_options::OptionMarker::new(#name, #description)
				#(.alias(#aliases))*
		}
	}
}

fn non_empty(lit: LitStr) -> syn::Result<LitStr> {
	if lit.value().is_empty() {
		Err(Error::new_spanned(lit, "option names must not be empty"))
	} else {
		Ok(lit)
	}
}

/// Rewrites a parameter type so it can be named from the generated `static`: lifetimes of the
/// method become `'static` and `Self` is replaced by the annotated type.
///
/// Function pointers and `Fn(..)` sugar elide their own lifetimes and bind them with `for<..>`,
/// those are part of the type and are left as written.
struct StaticParamType<'a> {
	self_ty: &'a Type,
	/// Lifetimes introduced by the enclosing `for<..>` binders.
	bound: Vec<Ident>,
	/// Depth of fn signatures whose elided lifetimes are late-bound.
	elision_scopes: usize,
	error: Option<Error>,
}

impl<'a> StaticParamType<'a> {
	const fn new(self_ty: &'a Type) -> Self {
		Self {
			self_ty,
			bound: Vec::new(),
			elision_scopes: 0,
			error: None,
		}
	}

	fn with_binder(
		&mut self,
		binder: Option<&BoundLifetimes>,
		elides: bool,
		visit: impl FnOnce(&mut Self),
	) {
		let bound_before = self.bound.len();
		if let Some(binder) = binder {
			self.bound
				.extend(binder.lifetimes.iter().filter_map(|param| match param {
					GenericParam::Lifetime(param) => Some(param.lifetime.ident.clone()),
					_ => None,
				}));
		}
		if elides {
			self.elision_scopes += 1;
		}

		visit(self);

		if elides {
			self.elision_scopes -= 1;
		}
		self.bound.truncate(bound_before);
	}
}

impl VisitMut for StaticParamType<'_> {
	fn visit_lifetime_mut(&mut self, lifetime: &mut Lifetime) {
		let elided_in_signature = lifetime.ident == "_" && self.elision_scopes > 0;
		if lifetime.ident != "static"
			&& !elided_in_signature
			&& !self.bound.contains(&lifetime.ident)
		{
			*lifetime = Lifetime::new("'static", lifetime.span());
		}
	}

	// Binders only declare lifetimes, there is nothing to rewrite in them
	fn visit_bound_lifetimes_mut(&mut self, _: &mut BoundLifetimes) {}

	fn visit_type_bare_fn_mut(&mut self, bare_fn: &mut TypeBareFn) {
		let binder = bare_fn.lifetimes.clone();
		self.with_binder(binder.as_ref(), true, |visitor| {
			visit_mut::visit_type_bare_fn_mut(visitor, bare_fn);
		});
	}

	fn visit_trait_bound_mut(&mut self, bound: &mut TraitBound) {
		let binder = bound.lifetimes.clone();
		self.with_binder(binder.as_ref(), false, |visitor| {
			visit_mut::visit_trait_bound_mut(visitor, bound);
		});
	}

	fn visit_parenthesized_generic_arguments_mut(
		&mut self,
		arguments: &mut ParenthesizedGenericArguments,
	) {
		self.with_binder(None, true, |visitor| {
			visit_mut::visit_parenthesized_generic_arguments_mut(visitor, arguments);
		});
	}

	fn visit_type_reference_mut(&mut self, reference: &mut TypeReference) {
		if reference.lifetime.is_none() && self.elision_scopes == 0 {
			reference.lifetime = Some(Lifetime::new("'static", Span::call_site()));
		}
		visit_mut::visit_type_reference_mut(self, reference);
	}

	fn visit_type_mut(&mut self, ty: &mut Type) {
		if matches!(ty, Type::Path(path) if path.qself.is_none() && path.path.is_ident("Self")) {
			*ty = self.self_ty.clone();
		} else if matches!(ty, Type::ImplTrait(_) | Type::Infer(_)) {
			self.error.get_or_insert_with(|| {
				Error::new_spanned(&*ty, "option parameters must have a concrete type")
			});
		} else {
			visit_mut::visit_type_mut(self, ty);
		}
	}
}

fn static_param_types(method: &ImplItemFn, self_ty: &Type) -> syn::Result<Vec<Type>> {
	if let Some(param) = method
		.sig
		.generics
		.params
		.iter()
		.find(|param| !matches!(param, GenericParam::Lifetime(_)))
	{
		return Err(Error::new_spanned(
			param,
			"operations with generic parameters can't be exposed as options",
		));
	}

	method
		.sig
		.inputs
		.iter()
		.filter_map(|arg| match arg {
			FnArg::Typed(typed) => Some(typed.ty.as_ref().clone()),
			FnArg::Receiver(_) => None,
		})
		.map(|mut ty| {
			let mut visitor = StaticParamType::new(self_ty);
			visitor.visit_type_mut(&mut ty);
			visitor.error.map_or(Ok(ty), Err)
		})
		.collect()
}

/// Removes the option marker from the method attributes, there can be at most one.
fn take_option_marker(method: &mut ImplItemFn) -> syn::Result<Option<OptionMarker>> {
	let (markers, attrs) = method
		.attrs
		.drain(..)
		.partition::<Vec<_>, _>(|attr| attr.path().is_ident(OPTION_ATTR));
	method.attrs = attrs;

	match markers.as_slice() {
		[] => Ok(None),
		[attr] => OptionMarker::parse(attr).map(Some),
		[_, duplicate, ..] => Err(Error::new_spanned(
			duplicate,
			"an operation can carry only one option marker",
		)),
	}
}

fn task_type_name(args: &TaskTypeArgs, self_ty: &Type) -> syn::Result<LitStr> {
	if let Some(name) = &args.name {
		return Ok(name.clone());
	}

	match self_ty {
		Type::Path(path) if path.qself.is_none() => path
			.path
			.segments
			.last()
			.map(|segment| LitStr::new(&segment.ident.to_string(), segment.ident.span()))
			.ok_or_else(|| Error::new_spanned(self_ty, "can't infer the task type name")),
		_ => Err(Error::new_spanned(
			self_ty,
			"can't infer the task type name, set it with `name = \"...\"`",
		)),
	}
}

fn expand(args: &TaskTypeArgs, item: &mut ItemImpl) -> syn::Result<TokenStream2> {
	if let Some((_, path, _)) = &item.trait_ {
		return Err(Error::new_spanned(
			path,
			"task_options can only be applied to inherent impl blocks",
		));
	}

	if !item.generics.params.is_empty() {
		return Err(Error::new_spanned(
			&item.generics,
			"task_options doesn't support generic task types",
		));
	}

	let self_ty = item.self_ty.as_ref().clone();
	let task_name = task_type_name(args, &self_ty)?;

	let mut operations = Vec::new();

	for impl_item in &mut item.items {
		let ImplItem::Fn(method) = impl_item else {
			continue;
		};

		let marker = take_option_marker(method)?;
		let name = LitStr::new(&method.sig.ident.to_string(), method.sig.ident.span());

		let params = match (static_param_types(method, &self_ty), &marker) {
			(Ok(params), _) => params,
			(Err(e), Some(_)) => return Err(e),
			// Unmarked operations never reach a catalog, no need to describe what can't be named
			(Err(_), None) => continue,
		};

		let marked = marker.map(|marker| {
			let marker = marker.to_tokens();
			quote! { .marked(#marker) }
		});

		operations.push(quote! {
			.operation(#name, |operation| operation #(.param::<#params>())* #marked)
		});
	}

	let parent = args.parent.as_ref().map(|parent| {
		quote! { .parent::<#parent>() }
	});

	Ok(quote! {
		#item

		impl ::sd_task_options::DeclaredTaskType for #self_ty {
			fn task_type() -> &'static ::sd_task_options::TaskType {
				static TASK_TYPE: ::sd_task_options::__private::Lazy<::sd_task_options::TaskType> =
					::sd_task_options::__private::Lazy::new(|| {
						::sd_task_options::TaskType::builder(#task_name)
							#parent
							#(#operations)*
							.build()
					});

				&TASK_TYPE
			}
		}

		::sd_task_options::__private::inventory::submit! {
			::sd_task_options::TaskRegistration::new(
				<#self_ty as ::sd_task_options::DeclaredTaskType>::task_type
			)
		}
	})
}

pub fn task_options_impl(args: TokenStream, input: TokenStream) -> TokenStream {
	let mut task_args = TaskTypeArgs::default();
	let parser = syn::meta::parser(|meta| task_args.parse(&meta));
	parse_macro_input!(args with parser);

	let mut item = parse_macro_input!(input as ItemImpl);

	expand(&task_args, &mut item)
		.unwrap_or_else(Error::into_compile_error)
		.into()
}
